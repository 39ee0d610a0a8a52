//! The backend-agnostic lock contract.

use crate::error::{MigralockError, Result};
use std::time::Duration;

/// A cross-process mutual-exclusion primitive.
///
/// Backends are polymorphic over this contract: the reference implementation
/// coordinates through an advisory file lock, but a network lock service or a
/// database advisory lock can implement the same surface without changing any
/// call site.
///
/// One instance represents one handle on a named exclusion resource. The
/// authoritative held/unlocked state lives in the backend's shared medium;
/// any number of processes may hold handles on the same identity, and at most
/// one of them can have a live acquisition at a time.
pub trait Lock {
    /// Acquire the lock, blocking or non-blocking.
    ///
    /// With `blocking = true` and `timeout = None`, waits indefinitely for
    /// the lock and returns `Ok(true)` once held. With a timeout, waits at
    /// most that long and returns `Ok(false)` if the lock never became
    /// available. With `blocking = false`, makes a single attempt and returns
    /// immediately; specifying a timeout alongside is a caller error
    /// (`ConfigError`).
    ///
    /// Re-acquiring through an instance that already holds the lock is not
    /// supported and fails with `IllegalState`.
    fn acquire(&mut self, blocking: bool, timeout: Option<Duration>) -> Result<bool>;

    /// Release the lock.
    ///
    /// Transitions the shared resource to unlocked; if other parties are
    /// blocked in `acquire`, exactly one of them proceeds next (no ordering
    /// promised). Releasing an instance that does not hold the lock fails
    /// with `IllegalState`.
    fn release(&mut self) -> Result<()>;

    /// Whether this instance currently holds the lock.
    ///
    /// A point-in-time observation of this process's view; it can be stale
    /// relative to concurrent activity in other processes.
    fn locked(&self) -> bool;
}

/// Validate the `blocking`/`timeout` combination shared by all backends.
///
/// A non-blocking attempt never waits, so pairing it with a timeout is
/// contradictory and rejected up front.
pub(super) fn check_acquire_options(blocking: bool, timeout: Option<Duration>) -> Result<()> {
    if !blocking && timeout.is_some() {
        return Err(MigralockError::ConfigError(
            "a timeout cannot be combined with a non-blocking acquire".to_string(),
        ));
    }
    Ok(())
}
