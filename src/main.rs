//! Lingodir - Batch File Translation
//!
//! Entry point: loads configuration from file, environment and flags, sets up
//! logging and runs the batch translation.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lingodir::batch::BatchRunner;
use lingodir::cli::{Args, Commands};
use lingodir::config::Config;
use lingodir::error::LingodirError;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let _guard = setup_logging(args.verbose)?;

    let mut config = Config::load(args.config.as_deref())?;

    match args.command {
        Commands::Init { output, force } => {
            if output.exists() && !force {
                return Err(LingodirError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    output.display()
                ))
                .into());
            }
            // Defaults only, so credentials from the environment never land on disk
            Config::default().save_to_file(&output)?;
            info!("Configuration template written to {}", output.display());
        }
        Commands::Run { input_dir, options } => {
            if let Some(input_dir) = input_dir {
                config.batch.input_dir = input_dir;
            }
            options.apply_to(&mut config);
            config.validate()?;

            info!("Starting translation process...");
            let runner = BatchRunner::from_config(&config)?;
            let summary = runner
                .run(
                    &config.batch.input_dir,
                    &config.batch.output_dir,
                    &config.batch.languages,
                )
                .await
                .inspect_err(|e| error!("Error during translation process: {}", e))?;

            info!(
                "Translation process completed: {} of {} file(s) translated, {} output(s) written",
                summary.files_processed, summary.files_seen, summary.outputs_written
            );
        }
        Commands::File { input, options } => {
            options.apply_to(&mut config);
            config.validate()?;

            info!("Starting translation of {}", input.display());
            let runner = BatchRunner::from_config(&config)?;
            let report = runner
                .run_file(&input, &config.batch.output_dir, &config.batch.languages)
                .await
                .inspect_err(|e| error!("Error during translation process: {}", e))?;

            info!(
                "Translation process completed: {} output(s) written, {} language(s) failed",
                report.written.len(),
                report.failed.len()
            );
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<WorkerGuard> {
    let log_dir: PathBuf = std::env::current_dir()?.join(".lingodir").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotation; the guard flushes the file writer on drop
    let file_appender = rolling::daily(&log_dir, "lingodir.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Logging initialized - console: {}, file: {}",
        log_level,
        log_dir.join("lingodir.log").display()
    );

    Ok(guard)
}
