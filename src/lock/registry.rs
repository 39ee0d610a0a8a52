//! Backend registry: resolve a lock backend by its configured name.

use super::backend::Lock;
use super::file::FileLock;
use crate::config::Config;
use crate::error::{MigralockError, Result};
use std::collections::BTreeMap;

/// Factory producing one lock instance from the loaded configuration.
pub type BackendFactory = fn(&Config) -> Box<dyn Lock>;

/// Explicit registration table mapping backend names to lock factories.
///
/// Names are unique and lookup is deterministic. The table is populated at
/// process start and treated as immutable afterwards; an unknown name is a
/// configuration error, fatal to the guarded operation, never a silent
/// fallback.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    backends: BTreeMap<&'static str, BackendFactory>,
}

impl BackendRegistry {
    /// Create a registry with the built-in backends registered.
    ///
    /// Currently that is just `file`, the single-host reference backend.
    pub fn builtin() -> Self {
        Self {
            backends: BTreeMap::from([("file", file_backend as BackendFactory)]),
        }
    }

    /// Register a backend under `name`.
    ///
    /// Fails when the name is empty or already taken. This is the plugin
    /// surface for additional backends (network lock services, database
    /// advisory locks); the built-in CLI currently wires up only `file`.
    #[allow(dead_code)]
    pub fn register(&mut self, name: &'static str, factory: BackendFactory) -> Result<()> {
        if name.is_empty() {
            return Err(MigralockError::ConfigError(
                "backend name must be non-empty".to_string(),
            ));
        }
        if self.backends.contains_key(name) {
            return Err(MigralockError::ConfigError(format!(
                "backend '{}' is already registered",
                name
            )));
        }
        self.backends.insert(name, factory);
        Ok(())
    }

    /// Look up the factory registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<BackendFactory> {
        if name.is_empty() {
            return Err(MigralockError::ConfigError(
                "backend name must be non-empty".to_string(),
            ));
        }

        self.backends.get(name).copied().ok_or_else(|| {
            MigralockError::ConfigError(format!(
                "no lock backend registered under '{}' (known backends: {})",
                name,
                self.names().join(", ")
            ))
        })
    }

    /// Resolve `name` and construct a lock instance for this invocation.
    pub fn create(&self, name: &str, config: &Config) -> Result<Box<dyn Lock>> {
        let factory = self.resolve(name)?;
        Ok(factory(config))
    }

    /// Registered backend names, in deterministic order.
    pub fn names(&self) -> Vec<&'static str> {
        self.backends.keys().copied().collect()
    }
}

fn file_backend(config: &Config) -> Box<dyn Lock> {
    Box::new(FileLock::new(config.lockfile.clone()))
}
