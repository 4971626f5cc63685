//! Consultation context types.
//!
//! A context selects which company manual the backend consults. `None`
//! means general mode; `Some(name)` is a registered company.

use serde::{Deserialize, Serialize};

/// Context name that is always offered, even on a fresh install.
///
/// The backend ships with this manual preloaded.
pub const DEFAULT_CONTEXT: &str = "병무청";

/// Sender name shown on agent messages in general mode.
pub const GENERAL_SENDER: &str = "AI Assistant";

/// How agent messages are labeled for the current context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLabel {
    /// Sender name shown above the message.
    pub sender: String,
    /// Whether the company branding mark is shown next to the sender.
    pub branded: bool,
}

impl AgentLabel {
    /// Label for the given active context.
    pub fn for_context(active_context: Option<&str>) -> Self {
        match active_context {
            None => Self {
                sender: GENERAL_SENDER.to_string(),
                branded: false,
            },
            Some(name) => Self {
                sender: name.to_string(),
                branded: true,
            },
        }
    }
}

/// Normalise a user-supplied context name.
///
/// Whitespace is trimmed; blank names mean general mode.
pub fn normalize_context(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string)
}
