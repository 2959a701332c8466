//! Parallel file discovery, content hashing, language detection, and
//! incremental change classification.

pub mod cancellation;
pub mod hasher;
pub mod incremental;
pub mod language_detect;
pub mod scanner;
pub mod types;
pub mod walker;

pub use cancellation::ScanCancellation;
pub use language_detect::Language;
pub use scanner::Scanner;
pub use types::{CachedFileMetadata, DiscoveredFile, FileStatus, ScanDiff, ScanStats, ScannedEntry};
