//! CLI module for Skrift.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skrift - YouTube transcripts and summaries
///
/// Fetch YouTube caption transcripts, summarize them with an LLM, and manage
/// reusable prompt templates. The name "Skrift" comes from the Norwegian word
/// for "writing."
#[derive(Parser, Debug)]
#[command(name = "skrift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Skrift and verify system requirements
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Fetch the caption transcript for a video
    Transcript {
        /// YouTube video URL
        url: String,

        /// Include [MM:SS] markers in the transcript
        #[arg(short, long)]
        timestamps: bool,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Fetch a transcript and summarize it with an LLM
    Summarize {
        /// YouTube video URL
        url: String,

        /// Free-form instruction for the LLM
        #[arg(short, long, conflicts_with = "prompt")]
        instruction: Option<String>,

        /// Name of a stored prompt template to use as the instruction
        #[arg(short, long)]
        prompt: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Include [MM:SS] markers in the transcript sent to the LLM
        #[arg(short, long)]
        timestamps: bool,
    },

    /// Manage reusable prompt templates
    Prompt {
        #[command(subcommand)]
        action: PromptAction,
    },

    /// Start the web application
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PromptAction {
    /// List stored prompt templates
    List,

    /// Show a template's full text
    Show {
        /// Template name
        name: String,
    },

    /// Add a new template
    Add {
        /// Template name
        name: String,
        /// Instruction text
        text: String,
    },

    /// Edit an existing template's text
    Edit {
        /// Template name
        name: String,
        /// New instruction text
        text: String,
    },

    /// Delete a template
    Delete {
        /// Template name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
