//! Transcript command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    timestamps: bool,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    let include_timestamps = timestamps || settings.captions.include_timestamps;
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = orchestrator.transcript(url, include_timestamps).await;
    spinner.finish_and_clear();

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    Output::success(&format!("Fetched transcript for {}", result.video_id));
    Output::transcript_info(
        &result.title,
        result.channel.as_deref(),
        result.duration_seconds,
        &result.transcript,
    );
    println!();

    match output {
        Some(path) => {
            std::fs::write(&path, &result.transcript)?;
            Output::success(&format!("Wrote transcript to {}", path));
        }
        None => {
            println!("{}", result.transcript);
        }
    }

    Ok(())
}
