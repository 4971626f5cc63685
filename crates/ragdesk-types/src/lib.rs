//! Shared domain types for ragdesk.
//!
//! This crate contains the types passed between the chat core, the backend
//! client and the terminal front end: transcript messages, context labels,
//! wire DTOs for the answer service, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod manual;
pub mod message;
