//! Client configuration types for ragdesk.
//!
//! `ClientConfig` represents the `config.toml` in the data directory that
//! points the client at a backend and tunes transport timeouts.

use serde::{Deserialize, Serialize};

use crate::context::DEFAULT_CONTEXT;

/// Backend address compiled into the binary.
///
/// `RAGDESK_SERVER_URL` at build time overrides the stock address.
pub const COMPILED_SERVER_URL: &str = match option_env!("RAGDESK_SERVER_URL") {
    Some(url) => url,
    None => "http://192.168.35.144:5000/",
};

/// Top-level configuration for the client.
///
/// Loaded from `~/.ragdesk/config.toml`. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the answer service (`http://host:port/`).
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Seconds allowed for establishing a connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seconds allowed for a whole request, including answer generation.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Context that is always listed as known.
    #[serde(default = "default_context")]
    pub default_context: String,
}

fn default_server_url() -> String {
    COMPILED_SERVER_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            default_context: default_context(),
        }
    }
}
