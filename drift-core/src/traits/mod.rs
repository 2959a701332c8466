//! Shared traits used across Drift crates.

pub mod cancellation;
pub mod storage;

pub use cancellation::CancellationToken;
pub use storage::{
    IDriftAnalysis, IDriftBatchWriter, IDriftEnforcement, IDriftFiles, IDriftReader,
    IDriftStructural, IWorkspaceStorage,
};
