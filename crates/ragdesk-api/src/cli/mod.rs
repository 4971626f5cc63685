//! CLI command definitions for the `ragdesk` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod contexts;
pub mod upload;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Ask questions against company manuals or in general mode.
#[derive(Parser)]
#[command(name = "ragdesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend address, overriding config.toml.
    #[arg(long, global = true, env = "RAGDESK_SERVER")]
    pub server: Option<String>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Company context to consult (omit for general mode).
        #[arg(long, short = 'c', conflicts_with = "pick")]
        context: Option<String>,

        /// Choose the context from the known-contexts menu.
        #[arg(long)]
        pick: bool,
    },

    /// Ask a single question and print the answer.
    Ask {
        /// The question text.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Company context to consult (omit for general mode).
        #[arg(long, short = 'c')]
        context: Option<String>,
    },

    /// Register a company manual with the backend.
    Upload {
        /// Company name to register the manual under.
        #[arg(long)]
        company: String,

        /// Manual file to upload.
        path: Option<PathBuf>,
    },

    /// List known company contexts.
    #[command(alias = "ls")]
    Contexts,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Spinner shown while the backend is working. Hidden when `hidden` is set.
pub fn waiting_spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
