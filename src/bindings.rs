/*
 * Responsibility
 * - Host-supplied configuration bindings (cors_origins etc.) looked up by name
 * - ProcessEnv reads the live process environment on every lookup
 * - StaticBindings holds a fixed map (bindings file, tests)
 * - Binding: the external resources a handler may need (KV store, relational DB)
 */
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::config::ConfigError;

/// Read-only view over the variables the hosting environment binds to this service.
///
/// Values are JSON so a binding can be a plain string, an array of strings or
/// any other shape the host chooses to inject.
pub trait Bindings: fmt::Debug + Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
}

/// Bindings backed by `std::env`.
///
/// `cors_origins` is looked up as `CORS_ORIGINS` first, then as-is.
/// Nothing is cached: an updated variable is visible on the next lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Bindings for ProcessEnv {
    fn get(&self, key: &str) -> Option<Value> {
        std::env::var(key.to_ascii_uppercase())
            .or_else(|_| std::env::var(key))
            .ok()
            .map(Value::String)
    }
}

/// Bindings from a fixed map.
#[derive(Debug, Default, Clone)]
pub struct StaticBindings {
    vars: HashMap<String, Value>,
}

impl StaticBindings {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Load a JSON object (`{"cors_origins": ["https://a.com"], ...}`) from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::Invalid("BINDINGS_FILE"))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let vars: HashMap<String, Value> =
            serde_json::from_str(raw).map_err(|_| ConfigError::Invalid("BINDINGS_FILE"))?;
        Ok(Self { vars })
    }
}

impl Bindings for StaticBindings {
    fn get(&self, key: &str) -> Option<Value> {
        self.vars.get(key).cloned()
    }
}

/// An external resource that must be bound before a handler can use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Kv,
    Database,
}

impl Binding {
    /// Operator-facing message returned when the binding is missing.
    pub fn unbound_message(&self) -> &'static str {
        match self {
            Binding::Kv => "KV数据库未绑定 KV database not bound",
            Binding::Database => "D1数据库未绑定 D1 database not bound",
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Kv => write!(f, "kv"),
            Binding::Database => write!(f, "database"),
        }
    }
}
