use anyhow::Result;
use clap::Parser;
use newfile::{
    app::{config::Settings, context::EditorContext},
    cli::{self, Cli},
};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first to get verbose flag
    let cli = Cli::parse();

    // Set config directory override before anything resolves paths
    if let Some(ref config_dir) = cli.config {
        newfile::util::paths::set_config_dir_override(Some(config_dir.clone()));
    }

    // Get logs directory (creates if needed)
    let logs_dir = newfile::util::paths::get_logs_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Set up daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(&logs_dir, "app.jsonl");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Set log level based on verbose flag
    let log_level = if cli.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    // Initialize logging with JSON format for structured logs
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(
                    log_level,
                )),
        )
        .init();

    tracing::info!("Starting newfile...");
    tracing::trace!("CLI arguments: {:?}", cli);
    if let Some(ref config_dir) = cli.config {
        tracing::info!("Using config directory override: {:?}", config_dir);
    }

    // Load settings; a broken settings file is reported rather than ignored
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(cli::error::INVALID_INPUT);
        }
    };
    tracing::debug!("Settings loaded: {:?}", settings);

    let cwd = std::env::current_dir()?;
    let context = EditorContext::detect(&cwd, cli.active.clone(), cli.workspace.clone());

    let exit_code = cli::handler::handle_command(cli.command, settings, context).await;

    // Flush buffered log lines before exiting
    drop(_guard);
    std::process::exit(exit_code);
}
