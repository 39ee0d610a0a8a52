//! Locking subsystem for migralock.
//!
//! This module implements the mutual-exclusion model that keeps concurrent
//! migration runs from interleaving:
//! - The [`Lock`] trait: the backend-agnostic exclusion contract with
//!   blocking, non-blocking, and bounded-timeout acquisition
//! - The [`BackendRegistry`]: an explicit name-to-factory table so the
//!   backend can be selected by a configuration string
//! - The reference [`FileLock`] backend over OS advisory file locks
//! - The [`LockGuard`] / [`run_guarded`] wrapper that guarantees release on
//!   every exit path
//!
//! # Exclusion model
//!
//! The shared exclusion state lives in the backend's medium (a file for the
//! reference backend), not in process memory; the in-process lock value is
//! only a handle. At most one successful, still-active acquisition exists
//! system-wide for a given lock identity. No acquisition order among waiters
//! is promised beyond "exactly one proceeds per release".
//!
//! # Holder Metadata
//!
//! While held, the file backend stores JSON metadata in the lockfile:
//! - `owner`: The holder of the lock (e.g., `user@HOST`)
//! - `pid`: The process ID
//! - `created_at`: RFC3339 timestamp
//! - `action`: The operation being performed
//!
//! The metadata is diagnostic only; the OS advisory lock is the arbiter.

mod backend;
mod file;
mod guard;
mod metadata;
mod registry;


// Re-export public API
pub use backend::Lock;
pub use file::FileLock;
pub use guard::{LockGuard, run_guarded};
pub use metadata::LockMetadata;
pub use registry::{BackendFactory, BackendRegistry};
