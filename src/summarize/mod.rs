//! Transcript summarization via an OpenAI chat model.
//!
//! The engine is deliberately thin: transcript text plus a free-form
//! instruction in, generated text out.

use crate::config::Prompts;
use crate::error::{Result, SkriftError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Summarization engine.
pub struct SummarizeEngine {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl SummarizeEngine {
    /// Create a new summarization engine.
    pub fn new(model: &str, temperature: f32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Summarize or analyze a transcript according to a free-form instruction.
    #[instrument(skip(self, transcript), fields(model = %self.model))]
    pub async fn summarize(
        &self,
        title: &str,
        transcript: &str,
        instruction: &str,
    ) -> Result<String> {
        info!("Summarizing transcript ({} chars)", transcript.len());

        let mut vars = HashMap::new();
        vars.insert("title".to_string(), title.to_string());
        vars.insert("transcript".to_string(), transcript.to_string());
        vars.insert("instruction".to_string(), instruction.to_string());

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.summarize.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.summarize.system.clone())
                .build()
                .map_err(|e| SkriftError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| SkriftError::OpenAI(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| SkriftError::OpenAI(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SkriftError::OpenAI(format!("Failed to generate summary: {}", e)))?;

        let summary = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| SkriftError::OpenAI("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated summary ({} chars)", summary.len());

        Ok(summary)
    }

    /// The model this engine calls.
    pub fn model(&self) -> &str {
        &self.model
    }
}
