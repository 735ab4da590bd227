//! Administrative surface for custom commands
//!
//! Handles: `commands add <name> <text...>`, `commands remove <name>`
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Refuse to redefine the administrative command name
//! - 1.0.0: Initial implementation with add/remove subcommands

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::{CommandHandler, Invocation, Messenger};

use super::registry::MacroRegistry;

/// Name the administrative handler is registered under
pub const ADMIN_COMMAND: &str = "commands";

/// Handler for the `commands` administrative command
pub struct MacroAdminHandler {
    registry: Arc<MacroRegistry>,
}

impl MacroAdminHandler {
    pub fn new(registry: Arc<MacroRegistry>) -> Self {
        MacroAdminHandler { registry }
    }

    fn usage(&self) -> String {
        let prefix = self.registry.prefix();
        format!(
            "usage: {prefix}{ADMIN_COMMAND} add <name> <text> or {prefix}{ADMIN_COMMAND} remove <name>"
        )
    }

    fn reserved(&self) -> String {
        format!(
            "the {}{ADMIN_COMMAND} command cannot be redefined",
            self.registry.prefix()
        )
    }
}

#[async_trait]
impl CommandHandler for MacroAdminHandler {
    async fn handle(
        &self,
        invocation: &Invocation,
        args: &str,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let (subcommand, rest) = split_word(args);

        match subcommand {
            "add" => {
                let (name, text) = split_word(rest);
                let text = text.trim();
                if name.is_empty() || text.is_empty() {
                    messenger.send(invocation.channel, &self.usage()).await
                } else if name == ADMIN_COMMAND {
                    messenger.send(invocation.channel, &self.reserved()).await
                } else {
                    info!("[{request_id}] add {name} requested in guild {}", invocation.guild);
                    self.registry.add(invocation, name, text, messenger).await
                }
            }
            "remove" => {
                let (name, extra) = split_word(rest);
                if name.is_empty() || !extra.trim().is_empty() {
                    messenger.send(invocation.channel, &self.usage()).await
                } else if name == ADMIN_COMMAND {
                    messenger.send(invocation.channel, &self.reserved()).await
                } else {
                    info!("[{request_id}] remove {name} requested in guild {}", invocation.guild);
                    self.registry.remove(invocation, name, messenger).await
                }
            }
            _ => messenger.send(invocation.channel, &self.usage()).await,
        }
    }
}

/// Split leading word from the rest, trimming leading whitespace first
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], &input[idx..]),
        None => (input, ""),
    }
}
