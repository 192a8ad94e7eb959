use serde_json::{Map, Value};
use std::path::Path;

use super::{check_counts, FormatStrategy, TranslationUnit};
use crate::error::{LingodirError, Result};

/// Flat JSON object: keys stay untranslated, every value is its own unit.
/// Key order follows the source document.
pub struct StructuredMapFormat;

impl FormatStrategy for StructuredMapFormat {
    fn decompose(&self, path: &Path, raw: &str) -> Result<Vec<TranslationUnit>> {
        let parse_error = |message: String| LingodirError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let value: Value = serde_json::from_str(raw).map_err(|e| parse_error(e.to_string()))?;

        let Value::Object(map) = value else {
            return Err(parse_error("expected a JSON object at the top level".to_string()));
        };

        map.into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => {
                        return Err(parse_error(format!(
                            "value for key '{}' is not a string",
                            key
                        )));
                    }
                };
                Ok(TranslationUnit::keyed(key, text))
            })
            .collect()
    }

    fn reassemble(&self, units: &[TranslationUnit], translations: Vec<String>) -> Result<String> {
        check_counts(units, &translations)?;

        let mut output = Map::new();
        for (unit, translation) in units.iter().zip(translations) {
            let key = unit.key.clone().unwrap_or_default();
            output.insert(key, Value::String(strip_surrounding_quotes(&translation).to_string()));
        }

        Ok(serde_json::to_string_pretty(&Value::Object(output))?)
    }
}

/// Remove at most one leading and one trailing `"`
pub fn strip_surrounding_quotes(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
