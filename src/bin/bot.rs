use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::{GuildId, UserId};
use serenity::prelude::*;
use std::sync::Arc;

use parrot::commands::{Actor, CommandTable, DiscordMessenger, Invocation};
use parrot::core::Config;
use parrot::database::GuildStore;
use parrot::features::macros::{
    MacroAdminHandler, MacroRegistry, PermissionChecker, PermissionConfig, ADMIN_COMMAND,
};

struct Handler {
    table: Arc<CommandTable>,
    prefix: String,
    bot_admin_ids: Vec<u64>,
}

impl Handler {
    /// Split message content into a command word and the argument rest.
    ///
    /// Returns None when the message does not start with the prefix or
    /// carries nothing after it.
    fn parse<'a>(&self, content: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = content.strip_prefix(&self.prefix)?.trim_start();
        if rest.is_empty() {
            return None;
        }
        match rest.find(char::is_whitespace) {
            Some(idx) => Some((&rest[..idx], &rest[idx..])),
            None => Some((rest, "")),
        }
    }

    /// Does the author hold the Administrator permission in this guild?
    async fn is_guild_admin(ctx: &Context, guild: GuildId, user: UserId) -> bool {
        match guild.member(ctx, user).await {
            Ok(member) => member
                .permissions(&ctx.cache)
                .map(|perms| perms.administrator())
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        // Custom commands are guild-scoped; ignore direct messages
        let guild = match msg.guild_id {
            Some(guild) => guild,
            None => return,
        };
        let (word, args) = match self.parse(&msg.content) {
            Some(parsed) => parsed,
            None => return,
        };
        let handler = match self.table.get(word) {
            Some(handler) => handler,
            None => return,
        };

        let invocation = Invocation {
            guild,
            channel: msg.channel_id,
            actor: Actor {
                id: msg.author.id,
                guild_admin: Self::is_guild_admin(&ctx, guild, msg.author.id).await,
                bot_admin: self.bot_admin_ids.contains(&msg.author.id.0),
            },
        };
        let messenger = DiscordMessenger::new(Arc::clone(&ctx.http));

        if let Err(e) = handler.handle(&invocation, args, &messenger).await {
            error!("command {word} failed: {e:#}");
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} connected and ready", ready.user.name);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting parrot...");

    let store = Arc::new(GuildStore::load(&config.commands_file)?);
    let table = Arc::new(CommandTable::new());
    let permissions = PermissionChecker::new(PermissionConfig {
        guild_admin_permission: config.guild_admin_permission,
        bot_admin_permission: config.bot_admin_permission,
        everyone_permission: config.everyone_permission,
    });
    let registry = Arc::new(MacroRegistry::new(
        Arc::clone(&store),
        Arc::clone(&table),
        permissions,
        &config.command_prefix,
    ));

    let restored = registry.install_persisted();
    info!("Restored {restored} custom commands from {}", config.commands_file);

    table.register(ADMIN_COMMAND, Arc::new(MacroAdminHandler::new(registry)));

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler {
            table,
            prefix: config.command_prefix.clone(),
            bot_admin_ids: config.bot_admin_ids.clone(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Client creation failed: {}", e))?;

    info!("Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!("Failed to establish gateway connection: {}", why));
    }

    Ok(())
}
