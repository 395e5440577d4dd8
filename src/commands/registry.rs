//! Command registry
//!
//! Centralized registry for all available operations.
//! This allows loose coupling between command implementations and the engine.

use super::{admin, hash, key, list, string, ttl, zset, Command};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of all available commands
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new command registry and register all commands
    pub fn new() -> Self {
        let mut registry = CommandRegistry {
            commands: HashMap::new(),
        };

        // Register string commands
        registry.register(Arc::new(string::SetCommand));
        registry.register(Arc::new(string::GetCommand));
        registry.register(Arc::new(string::AppendCommand));

        // Register key commands
        registry.register(Arc::new(key::DeleteCommand));
        registry.register(Arc::new(key::ExistsCommand));
        registry.register(Arc::new(key::KeysCommand));

        // Register TTL commands
        registry.register(Arc::new(ttl::ExpireCommand));
        registry.register(Arc::new(ttl::PersistCommand));
        registry.register(Arc::new(ttl::TtlCommand));

        // Register hash commands
        registry.register(Arc::new(hash::HSetCommand));
        registry.register(Arc::new(hash::HGetCommand));
        registry.register(Arc::new(hash::HDelCommand));
        registry.register(Arc::new(hash::HGetAllCommand));
        registry.register(Arc::new(hash::HDelAllCommand));

        // Register list commands
        registry.register(Arc::new(list::LPushCommand));
        registry.register(Arc::new(list::RPushCommand));
        registry.register(Arc::new(list::LPopCommand));
        registry.register(Arc::new(list::RPopCommand));
        registry.register(Arc::new(list::LRangeCommand));
        registry.register(Arc::new(list::LLenCommand));
        registry.register(Arc::new(list::DeleteListCommand));

        // Register sorted set commands
        registry.register(Arc::new(zset::ZAddCommand));
        registry.register(Arc::new(zset::ZRangeCommand));
        registry.register(Arc::new(zset::ZRevRangeCommand));
        registry.register(Arc::new(zset::ZRemValueCommand));
        registry.register(Arc::new(zset::ZRemKeyCommand));
        registry.register(Arc::new(zset::ZRankCommand));
        registry.register(Arc::new(zset::ZGetAllCommand));

        // Register admin commands
        registry.register(Arc::new(admin::FlushAllCommand));

        registry
    }

    /// Register a command under its name and aliases
    fn register(&mut self, command: Arc<dyn Command>) {
        for alias in command.aliases() {
            self.commands.insert(alias.to_uppercase(), command.clone());
        }
        let name = command.name().to_uppercase();
        self.commands.insert(name, command);
    }

    /// Get a command by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_uppercase()).cloned()
    }

    /// Check if a command exists
    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_uppercase())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
