//! Workspace management — project lifecycle orchestrator.
//!
//! This is the first thing that runs before any scan: without it there is no
//! `.drift/` directory, no `drift.db`, no schema — nothing to analyze into.
//!
//! ## Components
//! - **init** — Workspace initialization (`.drift/`, `drift.db`, `drift.toml`)
//! - **migration** — Schema migration via `PRAGMA user_version`
//! - **lock** — Workspace locking via `fd-lock` for concurrent access safety
//! - **detect** — Language and framework auto-detection
//! - **sqlite_storage** — `IWorkspaceStorage` implementation (status, backup,
//!   integrity check, gc) backed by the SQLite Backup API

pub mod detect;
pub mod errors;
pub mod init;
pub mod lock;
pub mod migration;
pub mod sqlite_storage;

// Re-export the most commonly used types.
pub use sqlite_storage::SqliteWorkspaceStorage;
pub use errors::{WorkspaceError, WorkspaceResult};
pub use init::{is_initialized, open_workspace, workspace_init, InitOptions, WorkspaceInfo};
pub use lock::WorkspaceLock;
pub use migration::{get_schema_version, initialize_workspace_db};
