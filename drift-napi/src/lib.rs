//! NAPI-RS bindings exposing the Drift analysis engine to Node.js.
//!
//! `driftInitialize()` opens drift.db and builds the global [`runtime::DriftRuntime`];
//! every other `drift*` function in [`bindings`] reads or writes through it.
//! Heavy work (`driftScan`, `driftAnalyze`, `driftAnalyzeChanged`) runs as
//! `AsyncTask`s on libuv's thread pool and returns a lightweight summary —
//! full results stay in SQLite and are pulled back with the query bindings.

pub mod bindings;
pub mod conversions;
pub mod feedback_store;
pub mod runtime;

pub use bindings::*;
