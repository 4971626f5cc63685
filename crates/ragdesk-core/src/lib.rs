//! Chat session logic and port trait definitions for ragdesk.
//!
//! This crate defines the "ports" (backend client, preference store, manual
//! reader) that the infrastructure layer implements. It depends only on
//! `ragdesk-types` -- never on `ragdesk-infra` or any HTTP/IO crate.

pub mod chat;
pub mod client;
pub mod manual;
pub mod registry;
