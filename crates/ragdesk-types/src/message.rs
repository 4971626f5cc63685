//! Transcript message types.
//!
//! A `Message` is one entry in the chat transcript. Messages are immutable
//! once created: the fields are private and only readable through accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who produced a message.
///
/// Drives which row kind the renderer draws for the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Agent,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::User => write!(f, "user"),
            Origin::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Origin::User),
            "agent" => Ok(Origin::Agent),
            other => Err(format!("invalid message origin: '{other}'")),
        }
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: Uuid,
    text: String,
    origin: Origin,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message stamped with a fresh id and the current time.
    pub fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            origin,
            created_at: Utc::now(),
        }
    }

    /// Shorthand for a user-submitted message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Origin::User)
    }

    /// Shorthand for an answer, error notice or welcome entry.
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(text, Origin::Agent)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}
