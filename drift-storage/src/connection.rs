//! Connection management: one dedicated writer connection, a small pool of
//! read-only connections, and WAL-mode pragmas shared by both.
//!
//! SQLite allows exactly one writer at a time; serializing all writes through
//! a single connection (used by [`crate::batch::BatchWriter`]) avoids
//! `SQLITE_BUSY` under concurrent load while readers stay lock-free thanks to
//! WAL mode.

pub mod pragmas {
    use drift_core::errors::StorageError;
    use rusqlite::Connection;

    fn sqe(e: rusqlite::Error) -> StorageError {
        StorageError::SqliteError { message: e.to_string() }
    }

    /// WAL mode + NORMAL synchronous + a busy timeout, applied to every
    /// connection this crate opens (writer, readers, and the batch-writer
    /// thread's own connection).
    pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
        conn.pragma_update(None, "journal_mode", "WAL").map_err(sqe)?;
        conn.pragma_update(None, "synchronous", "NORMAL").map_err(sqe)?;
        conn.pragma_update(None, "foreign_keys", true).map_err(sqe)?;
        conn.busy_timeout(std::time::Duration::from_secs(5)).map_err(sqe)?;
        Ok(())
    }
}

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use drift_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use pragmas::apply_pragmas;

const READER_POOL_SIZE: usize = 4;
const READER_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone)]
enum Backing {
    File(PathBuf),
    /// `cache=shared` URI — readers and writer all see the same database
    /// without a file on disk.
    Memory(String),
}

impl Backing {
    fn open(&self) -> Result<Connection, StorageError> {
        let conn = match self {
            Backing::File(path) => Connection::open(path),
            Backing::Memory(uri) => Connection::open_with_flags(
                uri,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            ),
        }
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
        apply_pragmas(&conn)?;
        Ok(conn)
    }
}

/// Owns the writer connection, a pool of reader connections, and (for
/// in-memory databases) an anchor connection that keeps the shared cache
/// alive for the manager's lifetime.
pub struct DatabaseManager {
    backing: Backing,
    writer: Mutex<Connection>,
    reader_tx: Sender<Connection>,
    reader_rx: Receiver<Connection>,
    /// Only set for in-memory databases — dropping it would tear down the
    /// shared-cache database out from under the writer/readers.
    _anchor: Option<Connection>,
}

/// A checked-out reader connection, returned to the pool on drop.
pub struct PooledReader<'a> {
    conn: Option<Connection>,
    manager: &'a DatabaseManager,
}

impl std::ops::Deref for PooledReader<'_> {
    type Target = Connection;
    fn deref(&self) -> &Connection {
        self.conn.as_ref().expect("connection taken")
    }
}

impl Drop for PooledReader<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = self.manager.reader_tx.send(conn);
        }
    }
}

impl DatabaseManager {
    /// Open (creating if necessary) a file-backed database at `path`, running
    /// any pending migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::SqliteError {
                    message: format!("create db directory {}: {e}", parent.display()),
                })?;
            }
        }
        Self::open_backing(Backing::File(path), None)
    }

    /// Open a private in-memory database shared across all of this
    /// manager's connections (writer, readers, batch writer).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let id = MEMORY_DB_COUNTER.fetch_add(1, Ordering::Relaxed);
        let uri = format!("file:drift_mem_{id}?mode=memory&cache=shared");
        let anchor = Backing::Memory(uri.clone()).open()?;
        Self::open_backing(Backing::Memory(uri), Some(anchor))
    }

    fn open_backing(backing: Backing, anchor: Option<Connection>) -> Result<Self, StorageError> {
        let writer = backing.open()?;
        crate::migrations::run_migrations(&writer)?;

        let (reader_tx, reader_rx) = bounded(READER_POOL_SIZE);
        for _ in 0..READER_POOL_SIZE {
            reader_tx
                .send(backing.open()?)
                .map_err(|_| StorageError::SqliteError {
                    message: "reader pool channel closed during init".to_string(),
                })?;
        }

        Ok(Self {
            backing,
            writer: Mutex::new(writer),
            reader_tx,
            reader_rx,
            _anchor: anchor,
        })
    }

    /// Path to the backing database file, if file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(p) => Some(p),
            Backing::Memory(_) => None,
        }
    }

    /// Open an independent connection to the same database, for the batch
    /// writer's dedicated thread (it must own its connection, not share the
    /// manager's writer mutex, since it serializes writes itself).
    pub fn open_batch_connection(&self) -> Result<Connection, StorageError> {
        self.backing.open()
    }

    /// Run `f` with exclusive access to the writer connection.
    pub fn with_writer<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let conn = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "writer connection mutex poisoned".to_string(),
        })?;
        f(&conn)
    }

    /// Check out a pooled reader connection, run `f`, and return it to the
    /// pool. Blocks briefly if every reader is checked out.
    pub fn with_reader<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let conn = self
            .reader_rx
            .recv_timeout(READER_CHECKOUT_TIMEOUT)
            .map_err(|_| StorageError::ConnectionPoolExhausted { active: READER_POOL_SIZE })?;
        let guard = PooledReader { conn: Some(conn), manager: self };
        f(&guard)
    }

    /// Force a WAL checkpoint, flushing the write-ahead log into the main
    /// database file. Useful before copying the db file or on shutdown.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
                .map_err(|e| StorageError::SqliteError { message: e.to_string() })
        })
    }
}
