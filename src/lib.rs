// Core layer - configuration and response utilities
pub mod core;

// Infrastructure - persisted per-guild storage
pub mod database;

// Application layer - command dispatch
pub mod commands;

// Features layer - all feature modules
pub mod features;

// Re-export core config
pub use core::Config;

// Re-export dispatch infrastructure
pub use commands::{Actor, CommandHandler, CommandTable, DiscordMessenger, Invocation, Messenger};

// Re-export storage
pub use database::GuildStore;

// Re-export the custom command feature
pub use features::macros::{
    MacroAdminHandler, MacroCommand, MacroRegistry, PermissionChecker, PermissionConfig,
    ADMIN_COMMAND,
};
