//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default config file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "migralock.yaml";

/// Default lockfile name used by the file backend.
///
/// All cooperating processes must agree on this path (or override it
/// consistently) for the lock to arbitrate anything.
pub const DEFAULT_LOCKFILE: &str = "migrations.lock";

/// Configuration for migralock.
///
/// This struct represents the contents of `migralock.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Path to the lockfile used by the file backend (default: "migrations.lock").
    #[serde(default = "default_lockfile")]
    pub lockfile: PathBuf,

    /// Name of the lock backend to use (default: "file").
    #[serde(default = "default_lock_backend")]
    pub lock_backend: String,

    /// Seconds to wait for the lock before timing out (default: 60).
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,

    // =========================================================================
    // Migration settings
    // =========================================================================
    /// The migration command to run while holding the lock
    /// (e.g., "alembic upgrade head" or "sqlx migrate run").
    #[serde(default)]
    pub migrate_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lockfile: default_lockfile(),
            lock_backend: default_lock_backend(),
            lock_timeout_secs: default_lock_timeout_secs(),
            migrate_command: String::new(),
        }
    }
}

impl Config {
    /// The configured lock timeout as a `Duration`.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }
}

fn default_lockfile() -> PathBuf {
    PathBuf::from(DEFAULT_LOCKFILE)
}

fn default_lock_backend() -> String {
    "file".to_string()
}

fn default_lock_timeout_secs() -> u64 {
    60
}
