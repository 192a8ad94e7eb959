//! File naming convention: `<base>_<language><extension>`.

use std::path::Path;

use crate::error::{LingodirError, Result};

/// Name parts of a source file, e.g. `report_en.json` → (`report`, `en`, `.json`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    /// Document name shared by all language variants
    pub base: String,
    /// Language token after the last underscore
    pub source_language: String,
    /// Extension including the leading dot, empty when the file has none
    pub extension: String,
}

impl SourceName {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LingodirError::Naming(path.display().to_string()))?;

        let (stem, extension) = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => (
                &file_name[..file_name.len() - ext.len() - 1],
                format!(".{}", ext),
            ),
            None => (file_name, String::new()),
        };

        let (base, language) = stem.rsplit_once('_').ok_or_else(|| {
            LingodirError::Naming(format!(
                "{}: expected <name>_<language>{}",
                file_name, extension
            ))
        })?;

        if base.is_empty() || language.is_empty() {
            return Err(LingodirError::Naming(format!(
                "{}: name and language must both be non-empty",
                file_name
            )));
        }

        Ok(Self {
            base: base.to_string(),
            source_language: language.to_string(),
            extension,
        })
    }

    /// Output name for one target language; same base and extension as the source
    pub fn output_file_name(&self, target_language: &str) -> String {
        format!("{}_{}{}", self.base, target_language, self.extension)
    }
}
