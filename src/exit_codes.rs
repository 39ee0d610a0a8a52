//! Exit code constants for the migralock CLI.
//!
//! The failure origin must be distinguishable from the exit code alone:
//! - 0: Success
//! - 1: Configuration error (bad args, unknown backend, invalid config)
//! - 2: Migration command failure
//! - 3: Lock acquisition timeout
//! - 4: Illegal lock state (internal invariant violation)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: unknown backend, invalid option combination, or a
/// malformed config file.
pub const CONFIG_ERROR: i32 = 1;

/// Migration failure: the protected migration command ran and failed.
pub const MIGRATION_FAILURE: i32 = 2;

/// Lock timeout: the lock could not be acquired within the configured wait;
/// the migration command never ran.
pub const LOCK_TIMEOUT: i32 = 3;

/// Illegal state: a lock was released without being held. Indicates a bug in
/// the locking layer itself, not an environment condition.
pub const ILLEGAL_STATE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            CONFIG_ERROR,
            MIGRATION_FAILURE,
            LOCK_TIMEOUT,
            ILLEGAL_STATE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn lock_timeout_distinguishable_from_migration_failure() {
        assert_ne!(LOCK_TIMEOUT, MIGRATION_FAILURE);
    }
}
