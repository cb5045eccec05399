//! Prompt templates for Skrift.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summarize: SummarizePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for transcript summarization and analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizePrompts {
    pub system: String,
    pub user: String,
}

impl Default for SummarizePrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an assistant that analyzes video transcripts.

Guidelines:
- Work only from the transcript text the user provides
- Follow the user's instruction precisely (summarize, extract, answer a question, etc.)
- If the transcript includes [MM:SS] markers, you may reference them in your answer
- If the transcript does not contain the information requested, say so clearly
- Be concise but complete"#
                .to_string(),

            user: r#"Instruction: {{instruction}}

Video title: {{title}}

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load summarize prompts if file exists
            let summarize_path = custom_path.join("summarize.toml");
            if summarize_path.exists() {
                let content = std::fs::read_to_string(&summarize_path)?;
                prompts.summarize = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.summarize.system.is_empty());
        assert!(prompts.summarize.user.contains("{{instruction}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Instruction: {{instruction}}\n\n{{transcript}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("instruction".to_string(), "Summarize this".to_string());
        vars.insert("transcript".to_string(), "hello world".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Instruction: Summarize this\n\nhello world");
    }

    #[test]
    fn test_custom_variables_do_not_override_provided() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("title".to_string(), "from config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("title".to_string(), "from caller".to_string());

        let result = prompts.render_with_custom("{{title}}", &vars);
        assert_eq!(result, "from caller");
    }
}
