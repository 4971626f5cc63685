//! Interactive CLI chat experience for ragdesk.
//!
//! Implements the chat loop: markdown-rendered answers under the active
//! context's label, waiting spinners, welcome banners, and slash commands
//! for context switching and manual upload. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
