//! CLI argument parsing for migralock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// migralock: Run schema migrations under a cross-process lock.
///
/// Migrations are non-idempotent when interleaved, so migralock acquires an
/// exclusive lock (file-based by default, pluggable by name) before invoking
/// the configured migration command, and releases it afterwards on every
/// exit path.
#[derive(Parser, Debug)]
#[command(name = "migralock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for migralock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run schema migrations while holding the migration lock.
    ///
    /// Acquires the configured lock backend with a bounded wait, runs the
    /// migration command, and releases the lock even when the command fails.
    /// Exits non-zero with distinguishable codes for lock timeout vs.
    /// migration failure.
    Migrate(MigrateArgs),

    /// Lock inspection commands.
    ///
    /// Show whether the migration lock is currently held and by whom.
    Lock(LockCommand),

    /// List the registered lock backends.
    Backends,
}

/// Arguments for the `migrate` command.
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// The locking backend to use during migrations (overrides config).
    #[arg(long)]
    pub lock_backend: Option<String>,

    /// Seconds to wait for the lock before timing out (overrides config;
    /// config default is 60).
    #[arg(long)]
    pub lock_timeout: Option<u64>,

    /// Migration command to run (overrides migrate_command from config).
    #[arg(long)]
    pub command: Option<String>,
}

/// Lock subcommands.
#[derive(Parser, Debug)]
pub struct LockCommand {
    #[command(subcommand)]
    pub action: LockAction,
}

/// Available lock actions.
#[derive(Subcommand, Debug)]
pub enum LockAction {
    /// Show the current holder state of the migration lock.
    ///
    /// Probes the lock with a single non-blocking attempt and prints the
    /// holder metadata when it is held.
    Status,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
