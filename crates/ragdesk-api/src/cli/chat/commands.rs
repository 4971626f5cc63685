//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for context
//! switching, manual upload, and transcript history. A leading `//` escapes
//! the slash so the rest of the line is sent as a question.

use std::path::PathBuf;

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Switch context; `None` returns to general mode.
    Context(Option<String>),
    /// List known contexts.
    Contexts,
    /// Show the transcript of the current context.
    History,
    /// Register a manual. Both parts may be missing; the service validates.
    Upload {
        company: String,
        path: Option<PathBuf>,
    },
    /// A `//`-escaped line, sent as a question with one slash removed.
    Send(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    if let Some(escaped) = trimmed.strip_prefix('/').filter(|rest| rest.starts_with('/')) {
        return Some(ChatCommand::Send(escaped.to_string()));
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/context" | "/ctx" => Some(ChatCommand::Context(
            (!arg.is_empty()).then(|| arg.to_string()),
        )),
        "/contexts" => Some(ChatCommand::Contexts),
        "/history" => Some(ChatCommand::History),
        "/upload" => {
            let (company, path) = split_upload_args(arg);
            Some(ChatCommand::Upload { company, path })
        }
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Split `/upload` arguments into company name and optional path.
///
/// A name containing spaces must be double-quoted: `"Acme Corp" ./acme.txt`.
fn split_upload_args(arg: &str) -> (String, Option<PathBuf>) {
    let (company, rest) = match arg.strip_prefix('"') {
        Some(quoted) => match quoted.split_once('"') {
            Some((name, rest)) => (name.trim(), rest.trim()),
            None => (quoted.trim(), ""),
        },
        None => match arg.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (arg, ""),
        },
    };

    let path = (!rest.is_empty()).then(|| PathBuf::from(rest));
    (company.to_string(), path)
}

/// Help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
        ("/context [NAME]", "Switch context (no name: general mode)"),
        ("/contexts", "List known contexts"),
        ("/history", "Show messages in this context"),
        ("/upload NAME [PATH]", "Register a company manual"),
        ("//TEXT", "Send TEXT starting with / as a question"),
    ];

    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, about) in rows {
        out.push_str(&format!("  {}  {about}\n", style(format!("{cmd:<19}")).cyan()));
    }
    out.push_str(&format!(
        "\n  {}\n",
        style("Quote names with spaces: /upload \"Acme Corp\" ./acme.txt").dim()
    ));
    out
}
