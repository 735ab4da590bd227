//! # Guild Database
//!
//! JSON-file-backed store for per-guild custom command tables.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial creation with load, point mutation and snapshot

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// `guild id -> (command name -> command text)`
pub type GuildTables = HashMap<String, HashMap<String, String>>;

/// Durable per-guild key/value store.
///
/// The whole document is read once at load; every point mutation
/// serializes the current state and rewrites the file. Guild ids are
/// keyed as decimal strings, matching how they appear in the JSON
/// document. Callers treat `set` and `clear` as atomic; an I/O failure
/// surfaces as an error with the in-memory state already updated.
pub struct GuildStore {
    path: PathBuf,
    tables: Mutex<GuildTables>,
}

impl GuildStore {
    /// Open the store at `path`. A missing file yields an empty store;
    /// the file is not created until the first mutation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            GuildTables::new()
        };
        Ok(GuildStore {
            path,
            tables: Mutex::new(tables),
        })
    }

    /// Look up the text stored under `(guild, name)`
    pub fn value(&self, guild: &str, name: &str) -> Option<String> {
        self.lock().get(guild).and_then(|table| table.get(name).cloned())
    }

    /// Create or overwrite the entry under `(guild, name)`
    pub fn set(&self, guild: &str, name: &str, text: &str) -> Result<()> {
        let mut tables = self.lock();
        tables
            .entry(guild.to_string())
            .or_default()
            .insert(name.to_string(), text.to_string());
        self.persist(&tables)
    }

    /// Drop the entry under `(guild, name)`.
    ///
    /// A guild whose table becomes empty is dropped from the document.
    /// Clearing an absent entry still rewrites the file.
    pub fn clear(&self, guild: &str, name: &str) -> Result<()> {
        let mut tables = self.lock();
        if let Some(table) = tables.get_mut(guild) {
            table.remove(name);
            if table.is_empty() {
                tables.remove(guild);
            }
        }
        self.persist(&tables)
    }

    /// Snapshot of every guild's table, for startup enumeration
    pub fn tables(&self) -> GuildTables {
        self.lock().clone()
    }

    fn persist(&self, tables: &GuildTables) -> Result<()> {
        let body = serde_json::to_string_pretty(tables)
            .context("serializing guild command tables")?;
        std::fs::write(&self.path, body)
            .with_context(|| format!("writing {}", self.path.display()))
    }

    fn lock(&self) -> MutexGuard<'_, GuildTables> {
        // A poisoned lock only means another task panicked mid-mutation;
        // the map itself is still structurally sound.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> GuildStore {
        GuildStore::load(dir.path().join("commands.json")).unwrap()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.tables().is_empty());
        assert_eq!(store.value("1", "greet"), None);
    }

    #[test]
    fn test_set_and_value() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("1", "greet", "hello").unwrap();
        assert_eq!(store.value("1", "greet").as_deref(), Some("hello"));
        assert_eq!(store.value("2", "greet"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("1", "greet", "hello").unwrap();
        store.set("1", "greet", "goodbye").unwrap();
        assert_eq!(store.value("1", "greet").as_deref(), Some("goodbye"));
    }

    #[test]
    fn test_clear_drops_empty_guild_table() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("1", "greet", "hello").unwrap();
        store.set("1", "bye", "farewell").unwrap();

        store.clear("1", "greet").unwrap();
        assert_eq!(store.value("1", "greet"), None);
        assert_eq!(store.value("1", "bye").as_deref(), Some("farewell"));

        store.clear("1", "bye").unwrap();
        assert!(store.tables().is_empty());
    }

    #[test]
    fn test_clear_absent_entry_is_harmless() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.clear("1", "greet").unwrap();
        assert!(store.tables().is_empty());
    }

    #[test]
    fn test_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commands.json");

        let store = GuildStore::load(&path).unwrap();
        store.set("1", "greet", "hello").unwrap();
        store.set("2", "greet", "hi there").unwrap();
        drop(store);

        let reloaded = GuildStore::load(&path).unwrap();
        assert_eq!(reloaded.value("1", "greet").as_deref(), Some("hello"));
        assert_eq!(reloaded.value("2", "greet").as_deref(), Some("hi there"));
        assert_eq!(reloaded.tables().len(), 2);
    }

    #[test]
    fn test_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commands.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(GuildStore::load(&path).is_err());
    }
}
