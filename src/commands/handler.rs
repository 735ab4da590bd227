//! Command handler trait, invocation context and outbound message seam
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Chunk long sends to the Discord message limit
//! - 1.0.0: Initial implementation for message-based command handling

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::sync::Arc;

use crate::core::response::chunk_for_message;

/// The user behind an invocation, with authorization bits resolved by the
/// event loop before the handler runs.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: UserId,
    /// Member holds the Administrator permission in the invoking guild
    pub guild_admin: bool,
    /// User id is in the configured bot administrator list
    pub bot_admin: bool,
}

impl Actor {
    /// Discord mention markup for this user
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// One incoming command invocation. Direct messages never reach handlers,
/// so a guild is always present.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub guild: GuildId,
    pub channel: ChannelId,
    pub actor: Actor,
}

/// Outbound channel messages.
///
/// Handlers talk to Discord only through this trait, so the whole command
/// layer runs in tests against a recording implementation.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, channel: ChannelId, text: &str) -> Result<()>;
}

/// Trait for prefix command handlers
///
/// `args` is the raw text after the command word, untrimmed. Handlers own
/// their argument parsing.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(
        &self,
        invocation: &Invocation,
        args: &str,
        messenger: &dyn Messenger,
    ) -> Result<()>;
}

/// Production messenger backed by the Discord HTTP client.
///
/// Text over the 2000-character message limit is sent as consecutive
/// chunks.
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        DiscordMessenger { http }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, channel: ChannelId, text: &str) -> Result<()> {
        for chunk in chunk_for_message(text) {
            channel
                .say(&self.http, chunk)
                .await
                .with_context(|| format!("sending message to channel {channel}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both traits must stay object-safe
    fn _assert_object_safe(_: &dyn CommandHandler, _: &dyn Messenger) {}

    #[test]
    fn test_actor_mention_format() {
        let actor = Actor {
            id: UserId(1234),
            guild_admin: false,
            bot_admin: false,
        };
        assert_eq!(actor.mention(), "<@1234>");
    }
}
