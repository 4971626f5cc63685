//! Chat session: transcript plus the active consultation context.
//!
//! Switching context always clears the transcript and leaves exactly one
//! agent welcome message, so one transcript never mixes sender labels.

use ragdesk_types::context::{normalize_context, AgentLabel};
use ragdesk_types::message::{Message, Origin};
use tokio::sync::broadcast;

use super::transcript::{TranscriptEvent, TranscriptStore};

/// Welcome shown when entering general mode.
pub const GENERAL_WELCOME: &str =
    "Hello! Ask me anything and I'll answer as best I can.";

/// Welcome text for a context switch.
///
/// General mode gets a generic invitation; a company context gets a fixed
/// prompt naming the company.
pub fn welcome_text(name: Option<&str>) -> String {
    match name {
        None => GENERAL_WELCOME.to_string(),
        Some(name) => {
            format!("You are now consulting {name}. Ask anything covered by the {name} manual.")
        }
    }
}

/// State of one chat session. Discarded at process end.
#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: TranscriptStore,
    active_context: Option<String>,
}

impl ChatSession {
    /// Create an empty session in general mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already switched to `context`, transcript primed
    /// with its welcome message.
    pub fn start(context: Option<&str>) -> Self {
        let mut session = Self::new();
        session.set_context(context);
        session
    }

    /// Switch the active context.
    ///
    /// Clears the transcript, then appends the welcome for the new context.
    /// Blank names switch to general mode. Returns the welcome message.
    pub fn set_context(&mut self, name: Option<&str>) -> Message {
        self.active_context = normalize_context(name);
        self.transcript.clear();
        let welcome = welcome_text(self.active_context.as_deref());
        self.transcript.append(welcome, Origin::Agent)
    }

    pub fn active_context(&self) -> Option<&str> {
        self.active_context.as_deref()
    }

    /// Label for agent messages under the current context.
    pub fn agent_label(&self) -> AgentLabel {
        AgentLabel::for_context(self.active_context())
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn append_user(&mut self, text: impl Into<String>) -> Message {
        self.transcript.append(text, Origin::User)
    }

    pub fn append_agent(&mut self, text: impl Into<String>) -> Message {
        self.transcript.append(text, Origin::Agent)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.transcript.subscribe()
    }

    /// Copy the current state for rendering outside the session lock.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_context: self.active_context.clone(),
            messages: self.transcript.messages().to_vec(),
        }
    }
}

/// Point-in-time copy of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub active_context: Option<String>,
    pub messages: Vec<Message>,
}

impl SessionSnapshot {
    pub fn agent_label(&self) -> AgentLabel {
        AgentLabel::for_context(self.active_context.as_deref())
    }
}
