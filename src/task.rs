use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

use crate::error::{LingodirError, Result};
use crate::format::{ContentKind, FormatStrategy, TranslationUnit};
use crate::naming::SourceName;
use crate::rate_limit::RateLimiter;
use crate::translate::Translator;

/// Outcome of translating one source file into every target language
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub source: PathBuf,
    /// Output files written, in target-language order
    pub written: Vec<PathBuf>,
    /// Target languages that failed, with the error text
    pub failed: Vec<(String, String)>,
    /// Target languages skipped because they match the source language
    pub skipped: Vec<String>,
}

impl FileReport {
    fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            ..Default::default()
        }
    }
}

/// Translates one file into each target language and writes one output per language
pub struct FileTranslationTask<'a> {
    translator: &'a dyn Translator,
    limiter: &'a RateLimiter,
    skip_source_language: bool,
}

impl<'a> FileTranslationTask<'a> {
    pub fn new(translator: &'a dyn Translator, limiter: &'a RateLimiter) -> Self {
        Self {
            translator,
            limiter,
            skip_source_language: false,
        }
    }

    pub fn skip_source_language(mut self, skip: bool) -> Self {
        self.skip_source_language = skip;
        self
    }

    /// Errors returned here (naming, read, parse) skip the whole file.
    /// Per-language failures are logged and recorded in the report instead.
    pub async fn run(
        &self,
        file_path: &Path,
        target_languages: &[String],
        output_dir: &Path,
    ) -> Result<FileReport> {
        let name = SourceName::parse(file_path)?;
        let kind = ContentKind::from_path(file_path);

        let content = fs::read_to_string(file_path)
            .await
            .map_err(|source| LingodirError::Read {
                path: file_path.to_path_buf(),
                source,
            })?;

        let strategy = kind.strategy();
        let units = strategy.decompose(file_path, &content)?;

        info!(
            "Translating {} ({}, source language '{}', {} unit(s))",
            file_path.display(),
            kind,
            name.source_language,
            units.len()
        );

        let mut report = FileReport::new(file_path);

        for target_language in target_languages {
            if self.skip_source_language && target_language.eq_ignore_ascii_case(&name.source_language) {
                info!(
                    "Skipping {} -> {}: target equals source language",
                    file_path.display(),
                    target_language
                );
                report.skipped.push(target_language.clone());
                continue;
            }

            match self
                .translate_to(&name, strategy, &units, target_language, output_dir)
                .await
            {
                Ok(output_path) => {
                    info!("Translated file written to: {}", output_path.display());
                    report.written.push(output_path);
                }
                Err(e) => {
                    error!(
                        "Failed to translate or write {} ({} -> {}): {}",
                        file_path.display(),
                        name.source_language,
                        target_language,
                        e
                    );
                    report.failed.push((target_language.clone(), e.to_string()));
                }
            }
        }

        if !report.failed.is_empty() {
            warn!(
                "{}: {} of {} target language(s) failed",
                file_path.display(),
                report.failed.len(),
                target_languages.len()
            );
        }

        Ok(report)
    }

    async fn translate_to(
        &self,
        name: &SourceName,
        strategy: &dyn FormatStrategy,
        units: &[TranslationUnit],
        target_language: &str,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let mut translations = Vec::with_capacity(units.len());

        for unit in units {
            self.limiter.ready().await;
            let translated = self
                .translator
                .translate(&unit.text, target_language, &name.source_language)
                .await?;
            self.limiter.throttle().await;
            translations.push(translated);
        }

        let body = strategy.reassemble(units, translations)?;

        let output_path = output_dir.join(name.output_file_name(target_language));
        fs::write(&output_path, body)
            .await
            .map_err(|source| LingodirError::Write {
                path: output_path.clone(),
                source,
            })?;

        Ok(output_path)
    }
}
