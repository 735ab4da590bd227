//! Custom command registry
//!
//! Keeps two structures loosely synchronized: the persisted per-guild
//! command tables in the [`GuildStore`], and the live process-global
//! [`CommandTable`] the message loop dispatches through. Handler
//! installation is keyed by name only, while stored text is keyed by
//! `(guild, name)`; the cross-guild consequences of that split are
//! documented on [`MacroRegistry::remove`].
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Report restore count from startup installation
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::commands::{CommandHandler, CommandTable, Invocation, Messenger};
use crate::database::GuildStore;

use super::permissions::PermissionChecker;

/// Notice sent when a macro exists elsewhere but not in the invoking guild
pub const NOT_AVAILABLE: &str = "this command is not available in this guild";

/// Mediates every mutation of the custom command set.
///
/// Constructed once at process start with its collaborators injected;
/// shared as `Arc<MacroRegistry>` between the administrative handler and
/// the startup path.
pub struct MacroRegistry {
    store: Arc<GuildStore>,
    table: Arc<CommandTable>,
    permissions: PermissionChecker,
    prefix: String,
}

impl MacroRegistry {
    pub fn new(
        store: Arc<GuildStore>,
        table: Arc<CommandTable>,
        permissions: PermissionChecker,
        prefix: &str,
    ) -> Self {
        MacroRegistry {
            store,
            table,
            permissions,
            prefix: prefix.to_string(),
        }
    }

    /// The prefix macro names are invoked with
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Install a handler for every command name persisted in the store.
    ///
    /// Names are global in the command table, so a name defined in
    /// several guilds gets exactly one handler. Returns the number of
    /// handlers installed.
    pub fn install_persisted(&self) -> usize {
        let mut installed = 0;
        for (guild, entries) in self.store.tables() {
            for name in entries.keys() {
                if !self.table.contains(name) {
                    self.install(name);
                    installed += 1;
                    debug!("restored command {name} (first seen in guild {guild})");
                }
            }
        }
        installed
    }

    /// Define or redefine a macro in the invoking guild.
    ///
    /// Persists the text, then swaps in a fresh handler for the name.
    /// Re-adding an existing name overwrites its text (last write wins)
    /// and leaves exactly one handler installed.
    pub async fn add(
        &self,
        invocation: &Invocation,
        name: &str,
        text: &str,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        if !self.permissions.has_permission(&invocation.actor) {
            messenger
                .send(
                    invocation.channel,
                    &format!(
                        "{}, you do not have permission to add a command",
                        invocation.actor.mention()
                    ),
                )
                .await?;
            return Ok(());
        }

        self.store.set(&invocation.guild.to_string(), name, text)?;
        // Swap rather than overwrite, in case the name is already live
        self.table.deregister(name);
        self.install(name);

        info!(
            "user {} added command {name} in guild {}",
            invocation.actor.id, invocation.guild
        );
        messenger
            .send(
                invocation.channel,
                &format!("added command {}{}", self.prefix, name),
            )
            .await
    }

    /// Remove a macro from the invoking guild.
    ///
    /// The handler table is keyed purely by name and shared across
    /// guilds: removing here drops the live handler for every guild,
    /// while other guilds' stored text stays in the store, unreachable
    /// until the name is added again somewhere.
    pub async fn remove(
        &self,
        invocation: &Invocation,
        name: &str,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        if !self.permissions.has_permission(&invocation.actor) {
            messenger
                .send(
                    invocation.channel,
                    &format!(
                        "{}, you do not have permission to remove a command",
                        invocation.actor.mention()
                    ),
                )
                .await?;
            return Ok(());
        }

        self.table.deregister(name);
        self.store.clear(&invocation.guild.to_string(), name)?;

        info!(
            "user {} removed command {name} in guild {}",
            invocation.actor.id, invocation.guild
        );
        messenger
            .send(
                invocation.channel,
                &format!("removed command {}{}", self.prefix, name),
            )
            .await
    }

    fn install(&self, name: &str) {
        self.table.register(
            name,
            Arc::new(MacroCommand {
                name: name.to_string(),
                store: Arc::clone(&self.store),
            }),
        );
    }
}

/// Live handler answering one macro name.
///
/// The name is global but the text lookup is per-guild at invocation
/// time, so the same handler serves every guild that defined the name.
pub struct MacroCommand {
    name: String,
    store: Arc<GuildStore>,
}

#[async_trait]
impl CommandHandler for MacroCommand {
    async fn handle(
        &self,
        invocation: &Invocation,
        _args: &str,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        match self.store.value(&invocation.guild.to_string(), &self.name) {
            Some(text) => messenger.send(invocation.channel, &text).await,
            None => {
                debug!(
                    "command {} invoked in guild {} with no entry there",
                    self.name, invocation.guild
                );
                messenger.send(invocation.channel, NOT_AVAILABLE).await
            }
        }
    }
}
