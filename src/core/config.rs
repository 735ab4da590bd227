//! Environment-driven bot configuration
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Add bot admin id list for bot-level administrators
//! - 1.1.0: Add command permission flags
//! - 1.0.0: Initial creation with token, prefix and storage path

use anyhow::{bail, Context, Result};

/// Runtime configuration, loaded once at process start.
///
/// All values come from environment variables (a `.env` file is honored
/// via dotenvy before this is read). Optional values fall back to
/// defaults; malformed values are startup errors rather than silent
/// fallbacks.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (required)
    pub discord_token: String,
    /// Prefix that triggers command parsing, e.g. `?`
    pub command_prefix: String,
    /// Path of the JSON file holding per-guild custom commands
    pub commands_file: String,
    /// Guild administrators may edit custom commands
    pub guild_admin_permission: bool,
    /// Bot-level administrators may edit custom commands
    pub bot_admin_permission: bool,
    /// Everyone may edit custom commands
    pub everyone_permission: bool,
    /// User ids treated as bot-level administrators
    pub bot_admin_ids: Vec<u64>,
    /// Default log filter for env_logger
    pub log_level: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            discord_token: std::env::var("DISCORD_TOKEN")
                .context("DISCORD_TOKEN must be set")?,
            command_prefix: env_or("COMMAND_PREFIX", "?"),
            commands_file: env_or("COMMANDS_FILE", "commands.json"),
            guild_admin_permission: env_bool("GUILD_ADMIN_PERMISSION", true)?,
            bot_admin_permission: env_bool("BOT_ADMIN_PERMISSION", true)?,
            everyone_permission: env_bool("EVERYONE_PERMISSION", false)?,
            bot_admin_ids: env_id_list("BOT_ADMIN_IDS")?,
            log_level: env_or("LOG_LEVEL", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_bool(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_bool(&raw).with_context(|| format!("invalid boolean in {key}")),
        Err(_) => Ok(default),
    }
}

fn env_id_list(key: &str) -> Result<Vec<u64>> {
    match std::env::var(key) {
        Ok(raw) => parse_id_list(&raw).with_context(|| format!("invalid user id in {key}")),
        Err(_) => Ok(Vec::new()),
    }
}

/// Parse a boolean setting, accepting the usual spellings
fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

/// Parse a comma-separated list of Discord user ids
fn parse_id_list(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .with_context(|| format!("expected a user id, got {part:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_truthy() {
        for raw in ["1", "true", "TRUE", "Yes", "on"] {
            assert!(parse_bool(raw).unwrap(), "{raw} should parse as true");
        }
    }

    #[test]
    fn test_parse_bool_falsy() {
        for raw in ["0", "false", "No", "OFF"] {
            assert!(!parse_bool(raw).unwrap(), "{raw} should parse as false");
        }
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_parse_id_list() {
        let ids = parse_id_list("123, 456,789").unwrap();
        assert_eq!(ids, vec![123, 456, 789]);
    }

    #[test]
    fn test_parse_id_list_empty() {
        assert!(parse_id_list("").unwrap().is_empty());
        assert!(parse_id_list(" , ,").unwrap().is_empty());
    }

    #[test]
    fn test_parse_id_list_rejects_non_numeric() {
        assert!(parse_id_list("123,abc").is_err());
    }
}
