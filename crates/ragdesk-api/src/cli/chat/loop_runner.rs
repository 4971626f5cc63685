//! Main chat loop orchestration.
//!
//! Picks the starting context, prints the banner, then reads lines until
//! EOF. Plain lines, and lines escaped with `//`, are sent as queries;
//! slash commands switch context,
//! list contexts, show history, or upload a manual. Transcript changes are
//! picked up from the session's event channel and rendered after each step.

use std::io::Write;

use console::style;
use dialoguer::Select;
use rustyline_async::SharedWriter;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, warn};

use ragdesk_core::chat::transcript::TranscriptEvent;
use ragdesk_types::context::normalize_context;
use ragdesk_types::error::RepositoryError;
use ragdesk_types::message::Origin;

use crate::cli::upload;
use crate::cli::waiting_spinner;
use crate::state::{AppState, ConcreteChatService};

use super::banner::{context_divider, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{sender_text, ChatRenderer};

/// Menu label for general mode in the context picker.
const GENERAL_ITEM: &str = "General";

/// Longest history preview, in characters.
const PREVIEW_CHARS: usize = 100;

/// What the renderer has to do after draining transcript events.
#[derive(Debug, Default, PartialEq)]
struct RenderPlan {
    /// A reset happened; print a context divider first.
    reset: bool,
    /// Events were lost; render the whole current transcript.
    full: bool,
    /// Transcript indices to render, in insertion order.
    indices: Vec<usize>,
}

/// Collapse pending events into a render plan.
///
/// Entries inserted before the last reset no longer exist, so only
/// insertions after it are kept. A lagged receiver re-renders the whole
/// current transcript.
fn plan_render(events: &mut Receiver<TranscriptEvent>) -> RenderPlan {
    let mut plan = RenderPlan::default();

    loop {
        match events.try_recv() {
            Ok(TranscriptEvent::Inserted { index }) => plan.indices.push(index),
            Ok(TranscriptEvent::Reset) => {
                plan.reset = true;
                plan.indices.clear();
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Transcript events lagged, re-rendering");
                plan.full = true;
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    if plan.full {
        plan.reset = true;
        plan.indices.clear();
    }
    plan
}

/// Render whatever the transcript gained since the last call.
async fn render_pending(
    service: &ConcreteChatService,
    events: &mut Receiver<TranscriptEvent>,
    renderer: &ChatRenderer,
    out: &mut SharedWriter,
) -> anyhow::Result<()> {
    let plan = plan_render(events);
    if plan == RenderPlan::default() {
        return Ok(());
    }

    let snapshot = service.snapshot().await;
    let label = snapshot.agent_label();

    if plan.reset {
        write!(out, "{}", context_divider(&label))?;
    }

    let indices: Vec<usize> = if plan.full {
        (0..snapshot.messages.len()).collect()
    } else {
        plan.indices
    };

    for index in indices {
        let Some(message) = snapshot.messages.get(index) else {
            continue;
        };
        // User lines are already echoed by the prompt.
        if message.origin() == Origin::User {
            continue;
        }
        writeln!(out, "{}", renderer.render_message(message, &label))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Show the context picker: general mode plus every known context.
async fn pick_context(state: &AppState) -> anyhow::Result<Option<String>> {
    let names: Vec<String> = state
        .manual_service
        .registry()
        .list()
        .await?
        .into_iter()
        .collect();

    let mut items = vec![GENERAL_ITEM.to_string()];
    items.extend(names.iter().cloned());

    let selection = Select::new()
        .with_prompt("Choose a context")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => None,
        n => names.get(n - 1).cloned(),
    })
}

/// Ask `query` behind a spinner. Failures land in the transcript as notices.
async fn send_query(service: &ConcreteChatService, query: &str) {
    let spinner = waiting_spinner("thinking...", false);
    let outcome = service.send(query).await;
    spinner.finish_and_clear();
    if let Err(err) = outcome {
        debug!(error = %err, "Query failed; notice appended to transcript");
    }
}

/// Whether to skip the unknown-context note for `name`.
///
/// An unreadable registry is logged and treated as known.
fn context_is_known(name: &str, lookup: Result<bool, RepositoryError>) -> bool {
    match lookup {
        Ok(known) => known,
        Err(err) => {
            warn!(error = %err, context = name, "Could not check known contexts");
            true
        }
    }
}

/// Truncate `text` to a single-line preview.
fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let head: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{head}...")
    } else {
        flat
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    context: Option<String>,
    pick: bool,
) -> anyhow::Result<()> {
    let initial = if pick {
        pick_context(state).await?
    } else {
        normalize_context(context.as_deref())
    };

    let service = state.chat_service(initial.as_deref());
    let mut events = service.subscribe().await;
    let renderer = ChatRenderer::new();

    let snapshot = service.snapshot().await;
    let label = snapshot.agent_label();
    print_welcome_banner(&label, state.client.base_url());
    for message in &snapshot.messages {
        println!("{}", renderer.render_message(message, &label));
    }
    println!();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, mut out) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                writeln!(out, "\n  {}", style("Session ended.").dim())?;
                break;
            }
            InputEvent::Interrupted => {
                writeln!(out, "\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => write!(out, "{}", commands::help_text())?,
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            writeln!(out, "\n  {}", style("Session ended.").dim())?;
                            break;
                        }
                        ChatCommand::Context(name) => {
                            if let Some(name) = name.as_deref() {
                                let lookup =
                                    state.manual_service.registry().contains(name).await;
                                if !context_is_known(name, lookup) {
                                    writeln!(
                                        out,
                                        "\n  {} '{}' is not a known context; answers may be general.",
                                        style("?").yellow().bold(),
                                        style(name).dim()
                                    )?;
                                }
                            }
                            service.set_context(name.as_deref()).await;
                        }
                        ChatCommand::Contexts => {
                            print_known_contexts(state, &service, &mut out).await?;
                        }
                        ChatCommand::History => {
                            let snapshot = service.snapshot().await;
                            let label = snapshot.agent_label();
                            writeln!(out)?;
                            for message in &snapshot.messages {
                                writeln!(
                                    out,
                                    "  {} {}",
                                    style(sender_text(message.origin(), &label)).bold(),
                                    preview(message.text())
                                )?;
                            }
                            writeln!(out)?;
                        }
                        ChatCommand::Upload { company, path } => {
                            match upload::register(state, &company, path.as_deref(), false).await
                            {
                                Ok(confirmation) => writeln!(
                                    out,
                                    "\n  {} {}\n  {}\n",
                                    style("✓").green().bold(),
                                    upload::success_notice(&company, &confirmation),
                                    style(format!(
                                        "Switch with: /context {}",
                                        confirmation.confirmed_name
                                    ))
                                    .dim()
                                )?,
                                Err(err) => {
                                    debug!(error = %err, "Manual upload failed");
                                    writeln!(
                                        out,
                                        "\n  {} {}\n",
                                        style("!").red().bold(),
                                        upload::failure_notice(&err)
                                    )?;
                                }
                            }
                        }
                        ChatCommand::Send(query) => send_query(&service, &query).await,
                        ChatCommand::Unknown(cmd_name) => {
                            writeln!(
                                out,
                                "\n  {} Unknown command: {}. Type /help for available commands,\n  \
                                 or start with // to send it as a question.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            )?;
                        }
                    }
                    render_pending(&service, &mut events, &renderer, &mut out).await?;
                    continue;
                }

                send_query(&service, &text).await;
                render_pending(&service, &mut events, &renderer, &mut out).await?;
            }
        }
    }

    chat_input.flush();
    Ok(())
}

/// List known contexts, marking the active one and the default.
async fn print_known_contexts(
    state: &AppState,
    service: &ConcreteChatService,
    out: &mut SharedWriter,
) -> anyhow::Result<()> {
    let registry = state.manual_service.registry();
    let active = service.active_context().await;

    let names = match registry.list().await {
        Ok(names) => names,
        Err(err) => {
            writeln!(
                out,
                "\n  {} Could not read known contexts: {err}\n",
                style("!").red().bold()
            )?;
            return Ok(());
        }
    };

    writeln!(out)?;
    let general_marker = if active.is_none() { "▶" } else { " " };
    writeln!(out, "  {general_marker} {}", style(GENERAL_ITEM).dim())?;
    for name in &names {
        let marker = if active.as_deref() == Some(name.as_str()) { "▶" } else { " " };
        let default_tag = if name == registry.default_name() {
            format!(" {}", style("(default)").dim())
        } else {
            String::new()
        };
        writeln!(out, "  {marker} {}{default_tag}", style(name).cyan())?;
    }
    writeln!(out)?;
    Ok(())
}
