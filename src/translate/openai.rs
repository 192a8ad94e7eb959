use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{LingodirError, Result};
use super::{Translator, common::{build_translation_prompt, ChatMessage, ChatRequest, ChatResponse}};

/// Translator backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiTranslator {
    client: Client,
    config: TranslateConfig,
}

impl OpenAiTranslator {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_translation_prompt(text, target_language, source_language),
            }],
        };

        debug!(
            "Sending translation request {} -> {} ({} chars) to {}",
            source_language,
            target_language,
            text.len(),
            self.config.endpoint
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LingodirError::Service(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(LingodirError::Service(format!("API error {}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LingodirError::Service(format!("Failed to read response: {}", e)))?;

        let chat_response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| LingodirError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        chat_response
            .first_content()
            .ok_or_else(|| LingodirError::InvalidResponse("response contained no choices".to_string()))
    }
}
