//! Summarize command implementation.

use super::open_prompt_store;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::prompt_store::PromptStore;
use anyhow::Result;

/// Run the summarize command.
pub async fn run_summarize(
    url: &str,
    instruction: Option<String>,
    prompt_name: Option<String>,
    model: Option<String>,
    timestamps: bool,
    settings: Settings,
) -> Result<()> {
    // Resolve the instruction: inline text, a stored template, or a default.
    let instruction = match (instruction, prompt_name) {
        (Some(text), _) => text,
        (None, Some(name)) => {
            let store = open_prompt_store(&settings)?;
            match store.find_by_name(&name).await? {
                Some(template) => template.text,
                None => {
                    Output::error(&format!("No stored prompt named '{}'", name));
                    Output::info("List available prompts with 'skrift prompt list'.");
                    return Err(anyhow::anyhow!("prompt not found: {}", name));
                }
            }
        }
        (None, None) => "Summarize the key points of this video.".to_string(),
    };

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

    Output::success(&format!("Fetched transcript for \"{}\"", result.title));

    let spinner = Output::spinner("Summarizing...");
    let summary = orchestrator
        .summarize(
            &result.title,
            &result.transcript,
            &instruction,
            model.as_deref(),
        )
        .await;
    spinner.finish_and_clear();

    match summary {
        Ok(summary) => {
            println!();
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e.into())
        }
    }
}
