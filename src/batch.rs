use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{LingodirError, Result};
use crate::rate_limit::RateLimiter;
use crate::task::{FileReport, FileTranslationTask};
use crate::translate::{Translator, TranslatorFactory};

/// Totals for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Regular files found in the input directory
    pub files_seen: usize,
    /// Files that reached the per-language stage
    pub files_processed: usize,
    /// Files skipped entirely (naming, read or parse errors)
    pub files_failed: usize,
    pub outputs_written: usize,
    pub language_failures: usize,
}

impl BatchSummary {
    fn record(&mut self, report: &FileReport) {
        self.files_processed += 1;
        self.outputs_written += report.written.len();
        self.language_failures += report.failed.len();
    }
}

/// Drives file translation over a whole input directory.
///
/// Files are handled one at a time so a single rate limiter spaces every
/// outbound call of the run.
pub struct BatchRunner {
    translator: Box<dyn Translator>,
    limiter: RateLimiter,
    skip_source_language: bool,
}

impl BatchRunner {
    pub fn new(translator: Box<dyn Translator>, limiter: RateLimiter) -> Self {
        Self {
            translator,
            limiter,
            skip_source_language: false,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let translator = TranslatorFactory::create_translator(config.translate.clone())?;
        let limiter = RateLimiter::new(config.batch.requests_per_minute);

        info!(
            "Using model '{}' at {} requests/minute ({:?} between calls)",
            config.translate.model,
            config.batch.requests_per_minute,
            limiter.interval()
        );

        Ok(Self::new(translator, limiter).with_skip_source_language(config.batch.skip_source_language))
    }

    pub fn with_skip_source_language(mut self, skip: bool) -> Self {
        self.skip_source_language = skip;
        self
    }

    /// Translate every regular file directly inside `input_dir`
    pub async fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        target_languages: &[String],
    ) -> Result<BatchSummary> {
        validate_directories(input_dir, output_dir).await?;

        let files = list_input_files(input_dir);
        info!(
            "Found {} file(s) in {} for {} target language(s)",
            files.len(),
            input_dir.display(),
            target_languages.len()
        );

        let mut summary = BatchSummary {
            files_seen: files.len(),
            ..Default::default()
        };

        for file_path in files {
            match self.translate_file(&file_path, target_languages, output_dir).await {
                Ok(report) => summary.record(&report),
                Err(e) => {
                    error!("Skipping {}: {}", file_path.display(), e);
                    summary.files_failed += 1;
                }
            }
        }

        info!(
            "Batch finished: {} output(s) written, {} file(s) skipped, {} language failure(s)",
            summary.outputs_written, summary.files_failed, summary.language_failures
        );

        Ok(summary)
    }

    /// Translate a single file, creating the output directory if needed
    pub async fn run_file(
        &self,
        file_path: &Path,
        output_dir: &Path,
        target_languages: &[String],
    ) -> Result<FileReport> {
        ensure_output_dir(output_dir).await?;
        self.translate_file(file_path, target_languages, output_dir).await
    }

    async fn translate_file(
        &self,
        file_path: &Path,
        target_languages: &[String],
        output_dir: &Path,
    ) -> Result<FileReport> {
        FileTranslationTask::new(self.translator.as_ref(), &self.limiter)
            .skip_source_language(self.skip_source_language)
            .run(file_path, target_languages, output_dir)
            .await
    }
}

/// The input directory must exist; the output directory is created with its parents
pub async fn validate_directories(input_dir: &Path, output_dir: &Path) -> Result<()> {
    if !input_dir.is_dir() {
        error!("Input directory \"{}\" does not exist.", input_dir.display());
        return Err(LingodirError::DirectoryMissing(input_dir.to_path_buf()));
    }

    ensure_output_dir(output_dir).await
}

async fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        info!(
            "Output directory \"{}\" does not exist. Creating it...",
            output_dir.display()
        );
        fs::create_dir_all(output_dir)
            .await
            .map_err(|source| LingodirError::Write {
                path: output_dir.to_path_buf(),
                source,
            })?;
    }
    Ok(())
}

/// Regular files directly inside `dir`, sorted by name. Subdirectories,
/// symlinks and special files are ignored.
pub fn list_input_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MockTranslator;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    fn languages(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn runner_with(mock: MockTranslator) -> BatchRunner {
        BatchRunner::new(Box::new(mock), RateLimiter::new(60_000))
    }

    #[test]
    fn test_list_input_files_skips_directories() {
        let dir = TempDir::new().unwrap();
        dir.child("b_en.txt").write_str("b").unwrap();
        dir.child("a_en.json").write_str("{}").unwrap();
        dir.child("nested").create_dir_all().unwrap();
        dir.child("nested/c_en.txt").write_str("c").unwrap();

        let files = list_input_files(dir.path());
        assert_eq!(
            files,
            vec![dir.path().join("a_en.json"), dir.path().join("b_en.txt")]
        );
    }

    #[tokio::test]
    async fn test_missing_input_dir_is_fatal_and_creates_nothing() {
        let root = TempDir::new().unwrap();
        let input = root.path().join("missing");
        let output = root.path().join("out");

        let mut mock = MockTranslator::new();
        mock.expect_translate().times(0);
        let runner = runner_with(mock);

        let err = runner
            .run(&input, &output, &languages(&["fr"]))
            .await
            .unwrap_err();
        assert!(matches!(err, LingodirError::DirectoryMissing(_)));
        assert!(err.is_fatal());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_output_dir_is_created_with_parents() {
        let root = TempDir::new().unwrap();
        let input = root.child("in");
        input.create_dir_all().unwrap();
        input.child("hello_en.txt").write_str("Hello").unwrap();
        let output = root.path().join("out/nested/deeper");

        let mut mock = MockTranslator::new();
        mock.expect_translate().returning(|_, _, _| Ok("Bonjour".to_string()));
        let runner = runner_with(mock);

        let summary = runner
            .run(input.path(), &output, &languages(&["fr"]))
            .await
            .unwrap();

        assert_eq!(summary.outputs_written, 1);
        root.child("out/nested/deeper/hello_fr.txt").assert("Bonjour");
    }

    #[tokio::test]
    async fn test_bad_file_does_not_stop_batch() {
        let root = TempDir::new().unwrap();
        let input = root.child("in");
        input.create_dir_all().unwrap();
        input.child("a_en.json").write_str("{broken").unwrap();
        input.child("noseparator.txt").write_str("x").unwrap();
        input.child("z_en.txt").write_str("Hello").unwrap();
        let output = root.child("out");

        let mut mock = MockTranslator::new();
        mock.expect_translate()
            .times(2)
            .returning(|text, target, _| Ok(format!("{}:{}", target, text)));
        let runner = runner_with(mock);

        let summary = runner
            .run(input.path(), output.path(), &languages(&["fr", "de"]))
            .await
            .unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                files_seen: 3,
                files_processed: 1,
                files_failed: 2,
                outputs_written: 2,
                language_failures: 0,
            }
        );
        output.child("z_fr.txt").assert("fr:Hello");
        output.child("z_de.txt").assert("de:Hello");
    }

    #[tokio::test]
    async fn test_rerun_overwrites_same_paths() {
        let root = TempDir::new().unwrap();
        let input = root.child("in");
        input.create_dir_all().unwrap();
        input.child("doc_en.txt").write_str("Hello").unwrap();
        let output = root.child("out");

        let mut mock = MockTranslator::new();
        mock.expect_translate().returning(|_, _, _| Ok("Hola".to_string()));
        let runner = runner_with(mock);

        for _ in 0..2 {
            runner
                .run(input.path(), output.path(), &languages(&["es"]))
                .await
                .unwrap();
        }

        assert_eq!(list_input_files(output.path()), vec![output.path().join("doc_es.txt")]);
    }

    #[tokio::test]
    async fn test_run_file_creates_output_dir() {
        let root = TempDir::new().unwrap();
        let source = root.child("page_en.xhtml");
        source.write_str("<p>Hi</p>").unwrap();
        let output = root.path().join("out");

        let mut mock = MockTranslator::new();
        mock.expect_translate().returning(|_, _, _| Ok("<p>Salut</p>".to_string()));
        let runner = runner_with(mock);

        let report = runner
            .run_file(source.path(), &output, &languages(&["fr"]))
            .await
            .unwrap();

        assert_eq!(report.written, vec![output.join("page_fr.xhtml")]);
    }
}
