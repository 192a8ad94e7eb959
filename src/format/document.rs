use std::path::Path;

use super::{check_counts, FormatStrategy, TranslationUnit};
use crate::error::Result;

/// Markup and plain text: the raw document, tags included, is one unit and
/// the translation is written back verbatim. Formatting is preserved by the
/// prompt, not by parsing.
pub struct WholeDocumentFormat;

impl FormatStrategy for WholeDocumentFormat {
    fn decompose(&self, _path: &Path, raw: &str) -> Result<Vec<TranslationUnit>> {
        Ok(vec![TranslationUnit::whole(raw)])
    }

    fn reassemble(&self, units: &[TranslationUnit], mut translations: Vec<String>) -> Result<String> {
        check_counts(units, &translations)?;
        Ok(translations.pop().unwrap_or_default())
    }
}
