// File format strategies
//
// Each content kind decides how a file is split into translation units and
// how translated units are put back together:
// - StructuredMap: one unit per key of a flat JSON object
// - Markup / PlainText: the whole document as a single unit

pub mod document;
pub mod structured;

use std::path::Path;

pub use document::WholeDocumentFormat;
pub use structured::{strip_surrounding_quotes, StructuredMapFormat};
use crate::error::{LingodirError, Result};

/// One piece of text sent to the translator in a single call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Source key, present only for structured-map files
    pub key: Option<String>,
    pub text: String,
}

impl TranslationUnit {
    pub fn whole(text: impl Into<String>) -> Self {
        Self { key: None, text: text.into() }
    }

    pub fn keyed(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self { key: Some(key.into()), text: text.into() }
    }
}

/// Decompose/reassemble behaviour for one content kind
pub trait FormatStrategy: Send + Sync {
    /// Split raw file content into translation units
    fn decompose(&self, path: &Path, raw: &str) -> Result<Vec<TranslationUnit>>;

    /// Build output content from the units and their translations, in unit order
    fn reassemble(&self, units: &[TranslationUnit], translations: Vec<String>) -> Result<String>;
}

/// Content kind, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    StructuredMap,
    Markup,
    PlainText,
}

static STRUCTURED_MAP: StructuredMapFormat = StructuredMapFormat;
static WHOLE_DOCUMENT: WholeDocumentFormat = WholeDocumentFormat;

impl ContentKind {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("json") => Self::StructuredMap,
            Some("xml" | "xhtml" | "html" | "htm") => Self::Markup,
            _ => Self::PlainText,
        }
    }

    pub fn strategy(&self) -> &'static dyn FormatStrategy {
        match self {
            Self::StructuredMap => &STRUCTURED_MAP,
            Self::Markup | Self::PlainText => &WHOLE_DOCUMENT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuredMap => "structured-map",
            Self::Markup => "markup",
            Self::PlainText => "plain-text",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_counts(units: &[TranslationUnit], translations: &[String]) -> Result<()> {
    if units.len() != translations.len() {
        return Err(LingodirError::InvalidResponse(format!(
            "expected {} translations, got {}",
            units.len(),
            translations.len()
        )));
    }
    Ok(())
}
