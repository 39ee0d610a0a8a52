//! Error types for the migralock CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for migralock operations.
///
/// Each variant maps to a distinct exit code so callers (and shell scripts
/// wrapping the CLI) can tell a lock timeout apart from a failed migration.
#[derive(Error, Debug)]
pub enum MigralockError {
    /// Invalid configuration: unknown backend name, bad option combination,
    /// or a malformed config file. Fatal, never retried.
    #[error("{0}")]
    ConfigError(String),

    /// The lock could not be acquired within the configured timeout.
    /// The migration command is guaranteed not to have run.
    #[error("Lock acquisition timed out: {0}")]
    LockTimeout(String),

    /// A lock was released without a prior successful acquisition. This is a
    /// bug in the locking layer, not a user-facing condition: the guarded
    /// wrapper only releases after a successful acquire.
    #[error("Illegal lock state: {0}")]
    IllegalState(String),

    /// The migration command ran and failed. Propagated unchanged apart from
    /// this wrapping; the lock was released before this error surfaced.
    #[error("Migration failed: {0}")]
    MigrationError(String),
}

impl MigralockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MigralockError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            MigralockError::LockTimeout(_) => exit_codes::LOCK_TIMEOUT,
            MigralockError::IllegalState(_) => exit_codes::ILLEGAL_STATE,
            MigralockError::MigrationError(_) => exit_codes::MIGRATION_FAILURE,
        }
    }
}

/// Result type alias for migralock operations.
pub type Result<T> = std::result::Result<T, MigralockError>;
