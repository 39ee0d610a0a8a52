//! Scoped lock acquisition and the guarded-operation wrapper.

use super::backend::Lock;
use crate::error::{MigralockError, Result};
use std::time::Duration;

/// RAII guard for an acquired lock.
///
/// Constructed only by a successful acquisition, and releases the lock when
/// dropped, so every exit path out of the guarded scope - normal return or
/// error propagation - ends with the lock released. If release fails during
/// drop, a warning is printed but no panic occurs.
pub struct LockGuard<'a> {
    lock: &'a mut dyn Lock,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a> LockGuard<'a> {
    /// Acquire `lock` with a bounded wait and return a guard holding it.
    ///
    /// `timeout = None` waits indefinitely. A bounded wait that elapses maps
    /// to `LockTimeout`: the caller gets a distinct, recognizable failure and
    /// the guarded operation is guaranteed not to have started.
    pub fn acquire(lock: &'a mut dyn Lock, timeout: Option<Duration>) -> Result<Self> {
        if !lock.acquire(true, timeout)? {
            let waited = match timeout {
                Some(t) => format!("gave up after {:?}", t),
                None => "lock never became available".to_string(),
            };
            return Err(MigralockError::LockTimeout(waited));
        }

        // The wrapper's correctness rests on "guard exists => lock held".
        debug_assert!(lock.locked(), "successful acquire must leave the handle held");

        Ok(Self {
            lock,
            released: false,
        })
    }

    /// Manually release the lock.
    ///
    /// This is useful when you want to release before the guard goes out of
    /// scope and handle release errors explicitly.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.lock.release()
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.lock.release()
        {
            eprintln!("Warning: failed to release lock: {}", e);
        }
    }
}

/// Run `op` while holding `lock`, releasing on every exit path.
///
/// The wrapper's own failure modes are acquisition failures (`LockTimeout`
/// when the bounded wait elapses - `op` never runs and nothing is released,
/// since nothing was acquired). Once acquired, `op`'s result or error is
/// propagated unchanged after the release has run; the release is never
/// skipped, even when `op` fails.
pub fn run_guarded<T>(
    lock: &mut dyn Lock,
    timeout: Option<Duration>,
    op: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let guard = LockGuard::acquire(lock, timeout)?;
    let result = op();

    match guard.release() {
        Ok(()) => result,
        // An op error wins over a release error; a release error after a
        // successful op must still surface.
        Err(release_err) => result.and(Err(release_err)),
    }
}
