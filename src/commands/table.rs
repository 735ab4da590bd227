//! Live command table
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Owned name keys and deregistration for runtime-defined commands
//! - 1.0.0: Initial implementation for handler dispatch

use dashmap::DashMap;
use std::sync::Arc;

use super::handler::CommandHandler;

/// Table mapping command names to live handlers.
///
/// This is the process-global dispatch surface the message-event loop
/// consults: names are unique across guilds even when the text behind
/// them is guild-scoped. Handlers are registered and deregistered at
/// runtime, so the map is concurrent; the table is shared as an
/// `Arc<CommandTable>` rather than reached through a global.
///
/// # Example
///
/// ```ignore
/// let table = CommandTable::new();
/// table.register("ping", Arc::new(PingHandler));
///
/// if let Some(handler) = table.get("ping") {
///     handler.handle(&invocation, args, &messenger).await?;
/// }
/// ```
#[derive(Default)]
pub struct CommandTable {
    handlers: DashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Install a handler under a name, replacing any previous handler
    pub fn register(&self, name: &str, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(name.to_string(), handler);
    }

    /// Remove the handler for a name.
    ///
    /// Returns whether a handler was installed. Deregistering an unknown
    /// name is a no-op.
    pub fn deregister(&self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Get the handler for a command name
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a command name is installed
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of installed command names
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All installed command names, in no particular order
    pub fn names(&self) -> Vec<String> {
        self.handlers.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handler::{Invocation, Messenger};
    use anyhow::Result;
    use async_trait::async_trait;

    struct NoopHandler;

    #[async_trait]
    impl CommandHandler for NoopHandler {
        async fn handle(
            &self,
            _invocation: &Invocation,
            _args: &str,
            _messenger: &dyn Messenger,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = CommandTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let table = CommandTable::new();
        table.register("ping", Arc::new(NoopHandler));

        assert!(!table.is_empty());
        assert!(table.contains("ping"));
        assert!(table.get("ping").is_some());
        assert!(table.get("pong").is_none());
    }

    #[test]
    fn test_register_replaces_existing() {
        let table = CommandTable::new();
        table.register("greet", Arc::new(NoopHandler));
        table.register("greet", Arc::new(NoopHandler));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_deregister() {
        let table = CommandTable::new();
        table.register("greet", Arc::new(NoopHandler));

        assert!(table.deregister("greet"));
        assert!(!table.contains("greet"));
        assert!(table.is_empty());

        // Unknown names are a no-op
        assert!(!table.deregister("greet"));
    }

    #[test]
    fn test_names() {
        let table = CommandTable::new();
        table.register("a", Arc::new(NoopHandler));
        table.register("b", Arc::new(NoopHandler));

        let mut names = table.names();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_default() {
        let table = CommandTable::default();
        assert!(table.is_empty());
    }
}
