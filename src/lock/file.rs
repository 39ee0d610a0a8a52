//! The reference file-based lock backend.

use super::backend::{Lock, check_acquire_options};
use super::metadata::LockMetadata;
use crate::error::{MigralockError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How often a bounded-timeout acquire re-attempts the lock.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A lock backend over an OS advisory file lock.
///
/// All cooperating processes must agree on the lockfile path; the advisory
/// lock on that file is the shared arbiter of exclusivity. The lockfile
/// itself is created on first use and never deleted - deleting it would
/// reintroduce the create/delete race that advisory locking avoids. An
/// orphaned lockfile never blocks anyone: the advisory lock dies with the
/// process that held it.
///
/// WARNING: This backend is only valid for processes sharing one host (or one
/// coherent filesystem). OS file locks do not coordinate across independent
/// machines, so for multi-host deployments a network- or database-backed
/// implementation of [`Lock`] must be used instead. This backend exists as
/// the default/dev-mode implementation.
#[derive(Debug)]
pub struct FileLock {
    /// Path to the lockfile (the lock identity).
    path: PathBuf,

    /// Open handle on the lockfile while the lock is held.
    file: Option<File>,

    /// Whether this instance currently holds the lock.
    held: bool,
}

impl FileLock {
    /// Create a new handle on the lock identified by `path`.
    ///
    /// Nothing is touched on disk until the first acquire.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            file: None,
            held: false,
        }
    }

    /// Open (creating if needed) the lockfile and ensure its parent exists.
    fn open_lockfile(&self) -> Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                MigralockError::ConfigError(format!(
                    "failed to create lockfile directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| {
                MigralockError::ConfigError(format!(
                    "failed to open lockfile '{}': {}",
                    self.path.display(),
                    e
                ))
            })
    }

    /// Write holder metadata into the lockfile after a successful acquire.
    fn write_metadata(&self, file: &mut File) -> Result<()> {
        let json = LockMetadata::new("migrate").to_json()?;

        let io_result = file
            .set_len(0)
            .and_then(|()| file.seek(SeekFrom::Start(0)))
            .and_then(|_| file.write_all(json.as_bytes()))
            .and_then(|()| file.sync_all());

        io_result.map_err(|e| {
            MigralockError::ConfigError(format!(
                "failed to write holder metadata to '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Make a single non-blocking attempt on the advisory lock.
    ///
    /// Returns `Ok(true)` when the lock transitioned to held, `Ok(false)`
    /// when another party holds it.
    fn try_lock(&self, file: &File) -> Result<bool> {
        match file.try_lock_exclusive() {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(false),
            Err(e) => Err(MigralockError::ConfigError(format!(
                "failed to lock '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl Lock for FileLock {
    fn acquire(&mut self, blocking: bool, timeout: Option<Duration>) -> Result<bool> {
        check_acquire_options(blocking, timeout)?;

        if self.held {
            return Err(MigralockError::IllegalState(format!(
                "lock '{}' is already held by this instance (re-entrant acquisition is not supported)",
                self.path.display()
            )));
        }

        let mut file = self.open_lockfile()?;

        let acquired = if !blocking {
            self.try_lock(&file)?
        } else if let Some(timeout) = timeout {
            let deadline = Instant::now() + timeout;
            loop {
                if self.try_lock(&file)? {
                    break true;
                }
                let now = Instant::now();
                if now >= deadline {
                    break false;
                }
                std::thread::sleep(POLL_INTERVAL.min(deadline - now));
            }
        } else {
            file.lock_exclusive().map_err(|e| {
                MigralockError::ConfigError(format!(
                    "failed to lock '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;
            true
        };

        if acquired {
            if let Err(e) = self.write_metadata(&mut file) {
                // Holding the lock without metadata would mislead `lock
                // status`, so back out the acquisition.
                let _ = FileExt::unlock(&file);
                return Err(e);
            }
            self.file = Some(file);
            self.held = true;
        }

        Ok(acquired)
    }

    fn release(&mut self) -> Result<()> {
        if !self.held {
            return Err(MigralockError::IllegalState(format!(
                "release called on unlocked lock '{}'",
                self.path.display()
            )));
        }

        self.held = false;
        let file = self.file.take();

        if let Some(file) = file {
            // Truncate the holder metadata before letting the next waiter in;
            // the lockfile itself stays behind.
            let _ = file.set_len(0);
            FileExt::unlock(&file).map_err(|e| {
                MigralockError::IllegalState(format!(
                    "failed to unlock '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    fn locked(&self) -> bool {
        self.held
    }
}
