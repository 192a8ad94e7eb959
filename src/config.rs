use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{LingodirError, Result};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "lingodir.toml";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 500;

const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub translate: TranslateConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Chat-completions endpoint URL
    pub endpoint: String,
    /// Bearer credential for the completion service
    pub api_key: String,
    /// Model identifier passed with every request
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory holding `<base>_<lang>.<ext>` source files
    pub input_dir: PathBuf,
    /// Directory receiving `<base>_<target>.<ext>` outputs
    pub output_dir: PathBuf,
    /// Ordered target language codes; duplicates are kept
    pub languages: Vec<String>,
    /// Outbound request budget per minute
    pub requests_per_minute: u32,
    /// Skip targets equal to the source language of a file
    pub skip_source_language: bool,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            languages: Vec::new(),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            skip_source_language: false,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LingodirError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| LingodirError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LingodirError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| LingodirError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Defaults, then the config file (explicit or `lingodir.toml`), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Config::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Config::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Override settings from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Override settings from any key lookup; unset keys leave the current value alone
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("APIKEY") {
            self.translate.api_key = api_key;
        }
        if let Some(model) = lookup("GPTMODEL") {
            self.translate.model = model;
        }
        if let Some(endpoint) = lookup("APIURL") {
            self.translate.endpoint = endpoint;
        }
        if let Some(input_dir) = lookup("INPUTDIR") {
            self.batch.input_dir = PathBuf::from(input_dir);
        }
        if let Some(output_dir) = lookup("OUTPUTDIR") {
            self.batch.output_dir = PathBuf::from(output_dir);
        }
        if let Some(languages) = lookup("LANGUAGES") {
            self.batch.languages = parse_languages(&languages);
        }
        if let Some(rpm) = lookup("RPM") {
            self.batch.requests_per_minute = parse_requests_per_minute(&rpm);
        }
        if let Some(skip) = lookup("SKIP_SOURCE_LANGUAGE") {
            self.batch.skip_source_language = parse_flag(&skip);
        }
    }

    /// Check that a run has everything it needs before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.translate.api_key.trim().is_empty() {
            return Err(LingodirError::Config(
                "API key is not set (APIKEY or translate.api_key)".to_string(),
            ));
        }
        if self.translate.model.trim().is_empty() {
            return Err(LingodirError::Config("Model identifier is empty".to_string()));
        }
        if self.batch.languages.is_empty() {
            return Err(LingodirError::Config(
                "No target languages configured (LANGUAGES or batch.languages)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split a comma-separated language list, keeping order and duplicates
pub fn parse_languages(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Positive integer, otherwise the default budget
pub fn parse_requests_per_minute(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(rpm) if rpm > 0 => rpm,
        _ => {
            warn!(
                "Invalid RPM value '{}', using default of {}",
                value, DEFAULT_REQUESTS_PER_MINUTE
            );
            DEFAULT_REQUESTS_PER_MINUTE
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.translate.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.translate.model, DEFAULT_MODEL);
        assert_eq!(config.batch.requests_per_minute, 500);
        assert!(config.batch.languages.is_empty());
        assert!(!config.batch.skip_source_language);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_with(lookup_from(&[
            ("APIKEY", "sk-test"),
            ("GPTMODEL", "gpt-4o"),
            ("INPUTDIR", "/data/in"),
            ("OUTPUTDIR", "/data/out"),
            ("LANGUAGES", "fr, es,,de,fr"),
            ("RPM", "60"),
            ("SKIP_SOURCE_LANGUAGE", "yes"),
        ]));

        assert_eq!(config.translate.api_key, "sk-test");
        assert_eq!(config.translate.model, "gpt-4o");
        assert_eq!(config.batch.input_dir, PathBuf::from("/data/in"));
        assert_eq!(config.batch.output_dir, PathBuf::from("/data/out"));
        assert_eq!(config.batch.languages, vec!["fr", "es", "de", "fr"]);
        assert_eq!(config.batch.requests_per_minute, 60);
        assert!(config.batch.skip_source_language);
    }

    #[test]
    fn test_unset_env_keeps_existing_values() {
        let mut config = Config::default();
        config.batch.requests_per_minute = 120;
        config.apply_env_with(lookup_from(&[]));
        assert_eq!(config.batch.requests_per_minute, 120);
        assert_eq!(config.batch.input_dir, PathBuf::from("input"));
    }

    #[test]
    fn test_invalid_rpm_falls_back_to_default() {
        assert_eq!(parse_requests_per_minute("abc"), 500);
        assert_eq!(parse_requests_per_minute("0"), 500);
        assert_eq!(parse_requests_per_minute("-5"), 500);
        assert_eq!(parse_requests_per_minute(" 30 "), 30);
    }

    #[test]
    fn test_validate_requires_key_and_languages() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(LingodirError::Config(_))));

        config.translate.api_key = "sk-test".to_string();
        assert!(matches!(config.validate(), Err(LingodirError::Config(_))));

        config.batch.languages = vec!["fr".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingodir.toml");
        std::fs::write(
            &path,
            "[batch]\ninput_dir = \"docs\"\noutput_dir = \"out\"\nlanguages = [\"ja\"]\nrequests_per_minute = 30\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.batch.input_dir, PathBuf::from("docs"));
        assert_eq!(config.batch.languages, vec!["ja"]);
        assert_eq!(config.translate.model, DEFAULT_MODEL);

        let saved = dir.path().join("saved.toml");
        config.save_to_file(&saved).unwrap();
        let reloaded = Config::from_file(&saved).unwrap();
        assert_eq!(reloaded.batch.requests_per_minute, 30);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[batch\n").unwrap();
        assert!(matches!(Config::from_file(&path), Err(LingodirError::Config(_))));
    }
}
