//! Skrift CLI entry point.

use anyhow::Result;
use clap::Parser;
use skrift::cli::{commands, Cli, Commands};
use skrift::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("skrift={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Transcript {
            url,
            timestamps,
            output,
        } => {
            commands::run_transcript(url, *timestamps, output.clone(), settings).await?;
        }

        Commands::Summarize {
            url,
            instruction,
            prompt,
            model,
            timestamps,
        } => {
            commands::run_summarize(
                url,
                instruction.clone(),
                prompt.clone(),
                model.clone(),
                *timestamps,
                settings,
            )
            .await?;
        }

        Commands::Prompt { action } => {
            commands::run_prompt(action, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
