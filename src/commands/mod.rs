//! # Command System
//!
//! Prefix command (`?`) dispatch for Discord messages.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Handler table keyed by owned names for runtime (de)registration
//! - 1.0.0: Initial handler trait and invocation context

pub mod handler;
pub mod table;

// Re-export handler infrastructure
pub use handler::{Actor, CommandHandler, DiscordMessenger, Invocation, Messenger};
pub use table::CommandTable;
