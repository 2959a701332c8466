//! Scanner data types: discovered files, cached metadata, scan diffs and stats.

use std::path::PathBuf;
use std::time::SystemTime;

use drift_core::types::collections::FxHashMap;

use super::language_detect::Language;

/// A file found by the walker, before hashing/classification.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
    pub mtime: SystemTime,
    pub language: Option<Language>,
}

/// Metadata for a previously scanned file, used to detect changes cheaply.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedFileMetadata {
    pub mtime: SystemTime,
    pub file_size: u64,
    pub content_hash: u64,
}

/// Classification of a file relative to the previous scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Unchanged,
}

/// A classified file entry, carrying its content hash for diffing.
#[derive(Debug, Clone)]
pub struct ScannedEntry {
    pub path: PathBuf,
    pub file_size: u64,
    pub language: Option<Language>,
    pub content_hash: u64,
    pub mtime: SystemTime,
}

/// The set of changes between the current scan and the cached state.
#[derive(Debug, Clone, Default)]
pub struct ScanDiff {
    pub added: Vec<ScannedEntry>,
    pub modified: Vec<ScannedEntry>,
    pub removed: Vec<PathBuf>,
    pub unchanged: Vec<ScannedEntry>,
    pub stats: ScanStats,
    pub errors: Vec<String>,
}

/// Timing and volume statistics for a single scan.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub discovery_ms: u64,
    pub hashing_ms: u64,
    pub diff_ms: u64,
    pub cache_hit_rate: f64,
    pub files_skipped_large: usize,
    pub files_skipped_ignored: usize,
    pub files_skipped_binary: usize,
    pub languages_found: FxHashMap<Language, usize>,
}
