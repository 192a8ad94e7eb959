use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, trimmed
    pub fn first_content(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|c| c.trim().to_string())
    }
}

/// Build the single instruction sent for every translation.
///
/// Untranslatable words stay as they are and the model must not ask back.
pub fn build_translation_prompt(text: &str, target_language: &str, source_language: &str) -> String {
    format!(
        "Translate the following text from {} to {}, preserving the context and original formatting. \
         If a word or element cannot be translated, leave it as is. Do not ask further questions.\n\
         Text: \"{}\"",
        source_language, target_language, text
    )
}
