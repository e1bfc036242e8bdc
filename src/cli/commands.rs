//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - resolve: fill a greeting/system prompt pair for one user
//! - extract: list the placeholders a template references
//! - profile: show one user's profile record
//! - session: prepare prompts from participant metadata

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// voicevars - Resolve voice-agent prompt templates against user profiles
#[derive(Parser, Debug)]
#[command(name = "voicevars")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile store to read (overrides the config file)
    #[arg(short, long, global = true, env = "VOICEVARS_PROFILE")]
    pub profiles: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a greeting and system prompt for a user
    Resolve {
        /// User identifier to look up in the profile store
        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        templates: TemplateArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the placeholders referenced by a template
    Extract {
        /// Template text
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the template from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show a user's profile record
    Profile {
        /// User identifier
        user: String,
    },

    /// Prepare session prompts from participant metadata
    Session {
        /// JSON file with the participant's name and attributes
        participant: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Template sources for `resolve`; each may be given inline or as a file
#[derive(Args, Debug, Default)]
pub struct TemplateArgs {
    /// Greeting template
    #[arg(short, long, conflicts_with = "first_message_file")]
    pub first_message: Option<String>,

    /// Read the greeting template from a file
    #[arg(long)]
    pub first_message_file: Option<PathBuf>,

    /// System prompt template
    #[arg(short, long, conflicts_with = "system_prompt_file")]
    pub system_prompt: Option<String>,

    /// Read the system prompt template from a file
    #[arg(long)]
    pub system_prompt_file: Option<PathBuf>,
}
