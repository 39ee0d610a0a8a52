//! The `migrate` command: the guarded-operation wrapper.
//!
//! Composes the backend registry, one lock instance, and the migration
//! runner into the safe invocation pattern: resolve backend by name, acquire
//! with the configured timeout, run migrations, release on every exit path.

use crate::cli::MigrateArgs;
use crate::config::Config;
use crate::error::{MigralockError, Result};
use crate::lock::{BackendRegistry, run_guarded};
use crate::migration;
use std::path::Path;

/// Run migrations under the migration lock.
///
/// CLI flags override the corresponding config values. Configuration errors
/// (unknown backend, no migration command) surface before anything is
/// acquired; a lock timeout surfaces as `LockTimeout` with the migration
/// guaranteed not to have run.
pub fn cmd_migrate(config_path: &Path, args: MigrateArgs) -> Result<()> {
    let mut config = Config::load_or_default(config_path)?;

    if let Some(backend) = args.lock_backend {
        config.lock_backend = backend;
    }
    if let Some(timeout) = args.lock_timeout {
        config.lock_timeout_secs = timeout;
    }
    if let Some(command) = args.command {
        config.migrate_command = command;
    }
    config.validate()?;

    if config.migrate_command.trim().is_empty() {
        return Err(MigralockError::ConfigError(
            "no migration command configured.\n\
             Set `migrate_command` in migralock.yaml or pass --command."
                .to_string(),
        ));
    }

    let registry = BackendRegistry::builtin();
    let mut lock = registry.create(&config.lock_backend, &config)?;

    println!(
        "Acquiring migration lock (backend: {}, timeout: {}s)...",
        config.lock_backend, config.lock_timeout_secs
    );

    run_guarded(lock.as_mut(), Some(config.lock_timeout()), || {
        println!("Lock acquired; running migrations.");
        migration::run_migrations(&config.migrate_command)
    })?;

    println!("Migrations complete; lock released.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::lock::{FileLock, Lock};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn migrate_args(command: Option<&str>) -> MigrateArgs {
        MigrateArgs {
            lock_backend: None,
            lock_timeout: None,
            command: command.map(String::from),
        }
    }

    fn write_config(temp_dir: &TempDir, extra: &str) -> PathBuf {
        let lockfile = temp_dir.path().join("migrations.lock");
        let config_path = temp_dir.path().join("migralock.yaml");
        std::fs::write(
            &config_path,
            format!("lockfile: {}\n{}", lockfile.display(), extra),
        )
        .unwrap();
        config_path
    }

    #[test]
    fn migrate_runs_command_and_releases_lock() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "");
        let marker = temp_dir.path().join("applied");

        cmd_migrate(
            &config_path,
            migrate_args(Some(&format!("touch {}", marker.display()))),
        )
        .unwrap();

        assert!(marker.exists());

        // The lock is free again after the run
        let mut probe = FileLock::new(temp_dir.path().join("migrations.lock"));
        assert!(probe.acquire(false, None).unwrap());
        probe.release().unwrap();
    }

    #[test]
    fn migrate_command_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join("applied");
        let config_path = write_config(
            &temp_dir,
            &format!("migrate_command: touch {}\n", marker.display()),
        );

        cmd_migrate(&config_path, migrate_args(None)).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn migrate_failure_releases_lock_and_maps_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "");

        let err = cmd_migrate(&config_path, migrate_args(Some("false"))).unwrap_err();
        assert!(matches!(err, MigralockError::MigrationError(_)));
        assert_eq!(err.exit_code(), exit_codes::MIGRATION_FAILURE);

        // Release-on-failure: a second acquire succeeds immediately
        let mut probe = FileLock::new(temp_dir.path().join("migrations.lock"));
        assert!(probe.acquire(false, None).unwrap());
        probe.release().unwrap();
    }

    #[test]
    fn migrate_with_held_lock_times_out() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "");
        let marker = temp_dir.path().join("applied");

        let mut holder = FileLock::new(temp_dir.path().join("migrations.lock"));
        assert!(holder.acquire(true, None).unwrap());

        let args = MigrateArgs {
            lock_backend: None,
            lock_timeout: Some(1),
            command: Some(format!("touch {}", marker.display())),
        };

        let err = cmd_migrate(&config_path, args).unwrap_err();
        assert!(matches!(err, MigralockError::LockTimeout(_)));
        assert_eq!(err.exit_code(), exit_codes::LOCK_TIMEOUT);

        // The migration never ran
        assert!(!marker.exists());

        holder.release().unwrap();
    }

    #[test]
    fn migrate_unknown_backend_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "");

        let args = MigrateArgs {
            lock_backend: Some("etcd".to_string()),
            lock_timeout: None,
            command: Some("true".to_string()),
        };

        let err = cmd_migrate(&config_path, args).unwrap_err();
        assert!(matches!(err, MigralockError::ConfigError(_)));
        assert!(err.to_string().contains("etcd"));
    }

    #[test]
    fn migrate_without_command_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "");

        let err = cmd_migrate(&config_path, migrate_args(None)).unwrap_err();
        assert!(matches!(err, MigralockError::ConfigError(_)));
        assert!(err.to_string().contains("--command"));

        // Nothing was acquired for a config error
        let mut probe = FileLock::new(temp_dir.path().join("migrations.lock"));
        assert!(probe.acquire(false, None).unwrap());
        probe.release().unwrap();
    }
}
