//! One-shot question: `ragdesk ask QUERY [--context NAME]`.

use anyhow::Result;
use console::style;

use ragdesk_core::chat::service::error_notice;
use ragdesk_types::context::{normalize_context, AgentLabel};
use ragdesk_types::error::ClientError;
use ragdesk_types::message::Message;

use crate::cli::chat::renderer::ChatRenderer;
use crate::cli::waiting_spinner;
use crate::state::AppState;

/// JSON body printed for a successful `--json` ask.
fn answer_json(server: &str, context: Option<&str>, answer: &Message) -> serde_json::Value {
    serde_json::json!({
        "server": server,
        "context": context,
        "id": answer.id(),
        "answer": answer.text(),
    })
}

/// Ask a single question and print the answer.
///
/// Exits non-zero on any failure, including a rejected blank query.
pub async fn ask(
    state: &AppState,
    query: &str,
    context: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let context = normalize_context(context);
    let service = state.chat_service(context.as_deref());

    let spinner = waiting_spinner("thinking...", json || quiet);
    let outcome = service.send(query).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(answer) => {
            if json {
                let body = answer_json(state.client.base_url(), context.as_deref(), &answer);
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                let label = AgentLabel::for_context(context.as_deref());
                let renderer = ChatRenderer::new();
                if !quiet {
                    println!();
                    println!("  {}", renderer.sender_line(answer.origin(), &label));
                }
                println!("{}", renderer.render_final(answer.text()));
            }
            Ok(())
        }
        Err(ClientError::Validation(err)) => {
            anyhow::bail!("{err}")
        }
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "context": context,
                        "error": err.to_string(),
                        "status": err.status_code(),
                    })
                );
            } else {
                eprintln!("  {} {}", style("!").red().bold(), error_notice(&err));
            }
            Err(err.into())
        }
    }
}
