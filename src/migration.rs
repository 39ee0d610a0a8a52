//! The protected operation: running the configured migration command.
//!
//! migralock does not interpret migrations; the migration engine (alembic,
//! sqlx, diesel, a project script, ...) is an opaque child process configured
//! as a shell-words command line. The core's only concern is that the command
//! runs exactly once while the lock is held and that its failure propagates
//! unchanged.

use crate::error::{MigralockError, Result};
use std::process::Command;

/// Run the configured migration command to completion.
///
/// The child inherits stdio so migration output streams to the user. A
/// non-zero exit status is a `MigrationError`; failing to parse or spawn the
/// command is surfaced with a fix hint.
pub fn run_migrations(command: &str) -> Result<()> {
    let command = command.trim();
    if command.is_empty() {
        return Err(MigralockError::ConfigError(
            "no migration command configured.\n\
             Set `migrate_command` in migralock.yaml or pass --command."
                .to_string(),
        ));
    }

    let args = shell_words::split(command).map_err(|e| {
        MigralockError::ConfigError(format!(
            "failed to parse migration command: {}\nCommand: {}\nFix: check for unmatched quotes or invalid escape sequences.",
            e, command
        ))
    })?;

    let Some((program, program_args)) = args.split_first() else {
        return Err(MigralockError::ConfigError(format!(
            "migration command is empty after parsing.\nCommand: {}",
            command
        )));
    };

    let status = Command::new(program).args(program_args).status().map_err(|e| {
        MigralockError::MigrationError(format!(
            "failed to execute '{}': {}\nFix: ensure the command is installed and in PATH.",
            program, e
        ))
    })?;

    if !status.success() {
        return Err(MigralockError::MigrationError(format!(
            "migration command exited with code {}\nCommand: {}",
            status.code().unwrap_or(-1),
            command
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeding_command_is_ok() {
        run_migrations("true").unwrap();
    }

    #[test]
    fn command_with_arguments_runs() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let marker = temp_dir.path().join("applied");

        run_migrations(&format!("touch {}", marker.display())).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn failing_command_is_migration_error() {
        let err = run_migrations("false").unwrap_err();
        assert!(matches!(err, MigralockError::MigrationError(_)));
        assert!(err.to_string().contains("exited with code 1"));
    }

    #[test]
    fn missing_program_is_migration_error() {
        let err = run_migrations("migralock-no-such-program-xyz").unwrap_err();
        assert!(matches!(err, MigralockError::MigrationError(_)));
        assert!(err.to_string().contains("PATH"));
    }

    #[test]
    fn empty_command_is_config_error() {
        let err = run_migrations("   ").unwrap_err();
        assert!(matches!(err, MigralockError::ConfigError(_)));
        assert!(err.to_string().contains("migrate_command"));
    }

    #[test]
    fn unparsable_command_is_config_error() {
        let err = run_migrations("psql 'unterminated").unwrap_err();
        assert!(matches!(err, MigralockError::ConfigError(_)));
    }
}
