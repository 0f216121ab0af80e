// Library exports for the CLI, tests, and embedding in a chat front end.
//
// The renderer is pure and synchronous: no I/O, no shared mutable state.
// The only lock in the crate guards the debug log file (`parking_lot::Mutex`).

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod config;
pub mod conversation;
pub mod prompt;
pub mod quiz;
pub mod render;

pub use conversation::{ConversationLog, Message, Role, StreamChunks};
pub use render::{ContentBlock, MarkdownRenderer};
