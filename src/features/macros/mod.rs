//! # Custom Commands Feature
//!
//! Per-guild user-defined text commands. Administrators store named
//! macros with `?commands add`, and the bot echoes the stored text back
//! whenever the macro name is invoked in that guild.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.4.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Reject redefining the administrative command name
//! - 1.1.0: Permission checker with everyone override
//! - 1.0.0: Initial release with add/remove and startup restore

pub mod admin;
pub mod permissions;
pub mod registry;

pub use admin::{MacroAdminHandler, ADMIN_COMMAND};
pub use permissions::{PermissionChecker, PermissionConfig};
pub use registry::{MacroCommand, MacroRegistry};
