use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{parse_languages, Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate every file in the input directory
    Run {
        /// Input directory containing <name>_<lang>.<ext> files
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        #[command(flatten)]
        options: TranslateOptions,
    },

    /// Translate a single file
    File {
        /// Input file named <name>_<lang>.<ext>
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        options: TranslateOptions,
    },

    /// Write a configuration template
    Init {
        /// Where to write the template
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Settings that override the config file and environment for one invocation
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Output directory for translated files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Target languages (comma-separated)
    #[arg(short, long)]
    pub languages: Option<String>,

    /// Requests per minute sent to the completion service
    #[arg(long)]
    pub rpm: Option<u32>,

    /// Model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// Do not translate a file into its own source language
    #[arg(long)]
    pub skip_source_language: bool,
}

impl TranslateOptions {
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(output_dir) = &self.output_dir {
            config.batch.output_dir = output_dir.clone();
        }
        if let Some(languages) = &self.languages {
            config.batch.languages = parse_languages(languages);
        }
        if let Some(rpm) = self.rpm.filter(|rpm| *rpm > 0) {
            config.batch.requests_per_minute = rpm;
        }
        if let Some(model) = &self.model {
            config.translate.model = model.clone();
        }
        if self.skip_source_language {
            config.batch.skip_source_language = true;
        }
    }
}
