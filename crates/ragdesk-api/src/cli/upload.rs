//! Manual upload: `ragdesk upload --company NAME [PATH]`, also used by the
//! `/upload` chat command.

use std::path::Path;

use anyhow::Result;
use console::style;

use ragdesk_types::error::{ClientError, ManualError, ValidationError};
use ragdesk_types::manual::UploadConfirmation;

use crate::cli::waiting_spinner;
use crate::state::AppState;

/// Notice shown when registration fails.
pub fn failure_notice(err: &ManualError) -> String {
    match err {
        ManualError::Client(ClientError::Validation(ValidationError::EmptyContextName)) => {
            "Enter a company name.".to_string()
        }
        ManualError::Client(ClientError::Validation(ValidationError::NoFileSelected)) => {
            "Select a manual file to upload.".to_string()
        }
        ManualError::Client(ClientError::Validation(other)) => other.to_string(),
        ManualError::Client(ClientError::FileRead(detail)) => {
            format!("Could not read the manual: {detail}")
        }
        ManualError::Client(ClientError::Server { code }) => {
            format!("Upload failed. (code: {code})")
        }
        ManualError::Client(ClientError::EmptyResponse) => {
            "Upload failed: the server sent an empty response.".to_string()
        }
        ManualError::Client(ClientError::Transport(_)) => {
            "Connection failed: cannot reach the server.".to_string()
        }
        ManualError::Registry { confirmed_name, .. } => format!(
            "Manual registered as '{confirmed_name}', but it could not be saved to known contexts."
        ),
    }
}

/// Notice shown when registration succeeds.
pub fn success_notice(submitted: &str, confirmation: &UploadConfirmation) -> String {
    if confirmation.confirmed_name == submitted.trim() {
        format!("{} Registered as '{}'.", confirmation.message, confirmation.confirmed_name)
    } else {
        format!(
            "{} Registered as '{}' (submitted as '{}').",
            confirmation.message,
            confirmation.confirmed_name,
            submitted.trim()
        )
    }
}

/// Register a manual and report the outcome.
///
/// Returns the confirmed name on success.
pub async fn register(
    state: &AppState,
    company: &str,
    path: Option<&Path>,
    hide_spinner: bool,
) -> Result<UploadConfirmation, ManualError> {
    let spinner = waiting_spinner("uploading manual...", hide_spinner);
    let outcome = state.manual_service.register(company, path).await;
    spinner.finish_and_clear();
    outcome
}

/// `ragdesk upload` entry point. Exits non-zero on failure.
pub async fn upload_manual(
    state: &AppState,
    company: &str,
    path: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    match register(state, company, path, json || quiet).await {
        Ok(confirmation) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "message": confirmation.message,
                        "submitted": company.trim(),
                        "confirmed": confirmation.confirmed_name,
                    }))?
                );
            } else if !quiet {
                println!();
                println!(
                    "  {} {}",
                    style("✓").green().bold(),
                    success_notice(company, &confirmation)
                );
                println!();
            }
            Ok(())
        }
        Err(err) => {
            let notice = failure_notice(&err);
            if json {
                println!("{}", serde_json::json!({ "error": notice }));
            } else {
                eprintln!("  {} {}", style("!").red().bold(), notice);
            }
            Err(err.into())
        }
    }
}
