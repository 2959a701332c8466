//! Incremental-scan classification: decide whether a discovered file is new,
//! changed, removed, or unchanged relative to the previous scan's cache.

use std::path::PathBuf;

use drift_core::errors::ScanError;
use drift_core::types::collections::FxHashMap;

use super::hasher::hash_content;
use super::types::{CachedFileMetadata, DiscoveredFile, FileStatus, ScanDiff, ScannedEntry, ScanStats};

/// Classify a single discovered file against its cached metadata.
///
/// When `force_full` is set, mtime is never trusted and content is always
/// hashed; otherwise an unchanged mtime+size short-circuits the read.
pub fn classify_file(
    file: &DiscoveredFile,
    cached: Option<&CachedFileMetadata>,
    force_full: bool,
) -> Result<(FileStatus, ScannedEntry), ScanError> {
    let mtime_matches = !force_full
        && cached.is_some_and(|c| c.mtime == file.mtime && c.file_size == file.file_size);

    if mtime_matches {
        let cached = cached.expect("checked above");
        return Ok((
            FileStatus::Unchanged,
            ScannedEntry {
                path: file.path.clone(),
                file_size: file.file_size,
                language: file.language,
                content_hash: cached.content_hash,
                mtime: file.mtime,
            },
        ));
    }

    let content = std::fs::read(&file.path).map_err(|e| ScanError::Io {
        path: file.path.display().to_string(),
        message: e.to_string(),
    })?;
    let content_hash = hash_content(&content);

    let status = match cached {
        None => FileStatus::Added,
        Some(c) if c.content_hash == content_hash => FileStatus::Unchanged,
        Some(_) => FileStatus::Modified,
    };

    Ok((
        status,
        ScannedEntry {
            path: file.path.clone(),
            file_size: file.file_size,
            language: file.language,
            content_hash,
            mtime: file.mtime,
        },
    ))
}

/// Build a `ScanDiff` from classified entries and the previous scan's cache,
/// detecting removals by set difference against entries seen this scan.
pub fn compute_diff(
    entries: Vec<(FileStatus, ScannedEntry)>,
    cached_metadata: &FxHashMap<PathBuf, CachedFileMetadata>,
    stats: ScanStats,
) -> ScanDiff {
    let mut diff = ScanDiff {
        stats,
        ..Default::default()
    };

    let mut seen: std::collections::HashSet<&PathBuf> = std::collections::HashSet::new();
    for (status, entry) in entries {
        seen.insert(&entry.path);
        match status {
            FileStatus::Added => diff.added.push(entry),
            FileStatus::Modified => diff.modified.push(entry),
            FileStatus::Unchanged => diff.unchanged.push(entry),
            FileStatus::Removed => diff.removed.push(entry.path),
        }
    }

    for path in cached_metadata.keys() {
        if !seen.contains(path) {
            diff.removed.push(path.clone());
        }
    }

    diff
}
