// Translation client
//
// The completion service sits behind the `Translator` trait so the batch
// orchestration can be driven by any implementation:
// - OpenAi: OpenAI-compatible chat-completions endpoint over HTTP

pub mod common;
pub mod openai;

use async_trait::async_trait;

pub use common::*;
pub use openai::OpenAiTranslator;
use crate::config::TranslateConfig;
use crate::error::Result;

/// One translation exchange with the completion service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_language` into `target_language`.
    /// Failures are returned as-is; nothing is retried.
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<String>;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create the default translator (OpenAI-compatible chat completions)
    pub fn create_translator(config: TranslateConfig) -> Result<Box<dyn Translator>> {
        Ok(Box::new(OpenAiTranslator::new(config)?))
    }
}
