//! Infrastructure layer for ragdesk.
//!
//! Contains implementations of the ports defined in `ragdesk-core`: the
//! reqwest-based backend client, the JSON preference store backing the
//! known-contexts registry, and the local filesystem manual reader. Also
//! loads `config.toml` and resolves the data directory.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod prefs;
