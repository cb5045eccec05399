//! Prompt template management command.

use super::open_prompt_store;
use crate::cli::{Output, PromptAction};
use crate::config::Settings;
use crate::prompt_store::PromptStore;
use anyhow::Result;
use std::sync::Arc;

/// Run the prompt command.
pub async fn run_prompt(action: &PromptAction, settings: Settings) -> Result<()> {
    let store = open_prompt_store(&settings)?;

    match action {
        PromptAction::List => {
            let templates = store.list().await?;

            if templates.is_empty() {
                Output::info("No stored prompt templates.");
                Output::info("Add one with: skrift prompt add <name> <text>");
                return Ok(());
            }

            Output::header("Prompt Templates");
            for template in &templates {
                Output::prompt_item(&template.name, &template.id.to_string(), &template.text);
            }
        }

        PromptAction::Show { name } => {
            let template = require_by_name(&store, name).await?;
            Output::kv("Name", &template.name);
            Output::kv("Id", &template.id.to_string());
            Output::kv("Updated", &template.updated_at.to_rfc3339());
            println!();
            println!("{}", template.text);
        }

        PromptAction::Add { name, text } => {
            if store.find_by_name(name).await?.is_some() {
                Output::error(&format!("A prompt named '{}' already exists.", name));
                Output::info("Edit it with: skrift prompt edit <name> <text>");
                return Err(anyhow::anyhow!("prompt already exists: {}", name));
            }

            let template = store.create(name, text).await?;
            Output::success(&format!("Added prompt '{}' ({})", template.name, template.id));
        }

        PromptAction::Edit { name, text } => {
            let template = require_by_name(&store, name).await?;
            store.update(template.id, name, text).await?;
            Output::success(&format!("Updated prompt '{}'", name));
        }

        PromptAction::Delete { name } => {
            let template = require_by_name(&store, name).await?;
            store.delete(template.id).await?;
            Output::success(&format!("Deleted prompt '{}'", name));
        }
    }

    Ok(())
}

async fn require_by_name(
    store: &Arc<dyn PromptStore>,
    name: &str,
) -> Result<crate::prompt_store::PromptTemplate> {
    match store.find_by_name(name).await? {
        Some(template) => Ok(template),
        None => {
            Output::error(&format!("No stored prompt named '{}'", name));
            Output::info("List available prompts with 'skrift prompt list'.");
            Err(anyhow::anyhow!("prompt not found: {}", name))
        }
    }
}
