//! Client Module
//!
//! Owns the engine handle and runs commands in the right transaction mode.
//!
//! ## Responsibilities
//! - Open (or create) the database file and hold the handle
//! - Run `Writer` / `Deleter` commands in a read-write transaction
//! - Run `Reader` / `Validator` commands in a read-only transaction
//! - Commit on success, roll back on the first error
//! - Release the handle on `close` or drop

use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use redb::{Builder, Database};
use tracing::{debug, info, warn};

use crate::capability::{Deleter, Reader, Validator, Writer};
use crate::config::Config;
use crate::error::{BucketError, Result};
use crate::kv::KvBatch;
use crate::txn::{Tx, TxnCommand, TxnOutput};

struct Attached {
    db: Database,
    path: PathBuf,
}

/// Entry point for all bucket and record operations
///
/// ## Concurrency Model
///
/// - **Writes** (`write`, `delete`): one read-write transaction at a time,
///   serialized by the engine's writer lock
/// - **Reads** (`read`, `read_all`, `validate`): concurrent read-only
///   transactions, each against a consistent snapshot
/// - The handle sits behind a `RwLock`: every operation holds the read side
///   for its duration; `close` takes the write side, so it waits for
///   in-flight transactions
pub struct Client {
    db: RwLock<Option<Attached>>,
}

impl Client {
    /// Create a client with no database attached
    pub fn new() -> Self {
        Self {
            db: RwLock::new(None),
        }
    }

    /// Create a client and attach the database described by `config`
    pub fn open(config: Config) -> Result<Self> {
        let client = Self::new();
        client.attach(config)?;
        Ok(client)
    }

    /// Open or create the database at `path` with default settings
    pub fn open_db(&self, path: impl AsRef<Path>) -> Result<()> {
        let config = Config::builder().path(path.as_ref()).build();
        self.attach(config)
    }

    /// Open or create the database described by `config` and attach it,
    /// replacing any database already attached
    ///
    /// Reattaching the file that is already open releases the current handle
    /// first; if the reopen then fails, the client is left closed.
    pub fn attach(&self, config: Config) -> Result<()> {
        config.validate()?;

        let mut slot = self.db.write();
        if slot
            .as_ref()
            .map_or(false, |attached| same_file(&attached.path, &config.path))
        {
            if let Some(current) = slot.take() {
                debug!(path = %current.path.display(), "released handle for reopen");
            }
        }

        let created = !config.path.exists();

        let mut builder = Builder::new();
        if let Some(bytes) = config.cache_size {
            builder.set_cache_size(bytes);
        }
        let db = builder.create(&config.path)?;

        if created {
            apply_file_mode(&config.path, config.file_mode)?;
        }

        info!(path = %config.path.display(), created, "database opened");

        let previous = slot.replace(Attached {
            db,
            path: config.path,
        });
        if let Some(previous) = previous {
            debug!(path = %previous.path.display(), "detached previous database");
        }

        Ok(())
    }

    /// Release the engine handle
    ///
    /// Waits for in-flight transactions. Calling it again is a no-op; later
    /// operations fail with `DatabaseNotOpen`.
    pub fn close(&self) -> Result<()> {
        if let Some(attached) = self.db.write().take() {
            info!(path = %attached.path.display(), "database closed");
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.db.read().is_some()
    }

    /// Path of the attached database file
    pub fn path(&self) -> Option<PathBuf> {
        self.db.read().as_ref().map(|attached| attached.path.clone())
    }

    // =========================================================================
    // Entry Points
    // =========================================================================

    /// Create or update whatever `w` describes, in a read-write transaction
    pub fn write<W: Writer + ?Sized>(&self, w: &W) -> Result<()> {
        self.update(w.write_txn()).map(|_| ())
    }

    /// Read into `r` in place, in a read-only transaction
    pub fn read<R: Reader + ?Sized>(&self, r: &mut R) -> Result<()> {
        self.view(r.read_txn()).map(|_| ())
    }

    /// Read and return the record batch `r` produces
    ///
    /// Fails with `ResultTypeMismatch` if `r` does not produce a batch
    /// (only a `Bucket` scan does).
    pub fn read_all<R: Reader + ?Sized>(&self, r: &mut R) -> Result<KvBatch> {
        self.view(r.read_txn())?.into_batch()
    }

    /// Delete whatever `d` describes, in a read-write transaction
    pub fn delete<D: Deleter + ?Sized>(&self, d: &D) -> Result<()> {
        self.update(d.delete_txn()).map(|_| ())
    }

    /// Check that `v` exists, in a read-only transaction
    pub fn validate<V: Validator + ?Sized>(&self, v: &V) -> Result<()> {
        self.view(v.validate_txn()).map(|_| ())
    }

    // =========================================================================
    // Transaction Boundaries
    // =========================================================================

    /// Run a command in a read-write transaction
    fn update(&self, command: TxnCommand<'_>) -> Result<TxnOutput> {
        let guard = self.db.read();
        let attached = guard.as_ref().ok_or(BucketError::DatabaseNotOpen)?;

        let label = command.label();
        let tx = Tx::write(attached.db.begin_write()?);

        match command.execute(&tx) {
            Ok(output) => {
                tx.commit()?;
                debug!(command = label, "update committed");
                Ok(output)
            }
            Err(err) => {
                warn!(command = label, error = %err, "update rolled back");
                if let Err(abort_err) = tx.rollback() {
                    warn!(command = label, error = %abort_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Run a command in a read-only transaction
    fn view(&self, command: TxnCommand<'_>) -> Result<TxnOutput> {
        let guard = self.db.read();
        let attached = guard.as_ref().ok_or(BucketError::DatabaseNotOpen)?;

        let label = command.label();
        let tx = Tx::read(attached.db.begin_read()?);

        let result = command.execute(&tx);
        tx.rollback()?;

        match &result {
            Ok(_) => debug!(command = label, "view completed"),
            Err(err) => debug!(command = label, error = %err, "view failed"),
        }
        result
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("path", &self.path())
            .field("is_open", &self.is_open())
            .finish()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if let Some(attached) = self.db.get_mut().take() {
            debug!(path = %attached.path.display(), "database released on drop");
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn apply_file_mode(path: &Path, mode: u32) -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn apply_file_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
