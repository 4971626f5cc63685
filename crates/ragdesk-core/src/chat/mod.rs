//! Chat transcript, context switching and the send flow.
//!
//! `TranscriptStore` is the ordered message list, `ChatSession` pairs it with
//! the active context, and `ChatService` drives a session against a
//! `RemoteClient`.

pub mod service;
pub mod session;
pub mod transcript;
