//! Relearning cadence — decides how much of the convention-learning pipeline
//! a scan needs to redo, based on project maturity and how much changed.

/// How much of the learning pipeline a scan should redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningMode {
    /// Reuse prior conventions outright; only refresh last-seen timestamps.
    Reuse,
    /// Re-aggregate and re-score only the patterns touched by changed files.
    Incremental,
    /// Re-run discovery over the whole project.
    Full,
}

const WARMUP_SCANS: u64 = 20;
const MIN_TOTAL_FILES: u64 = 50;

/// Choose a `LearningMode` for the current scan.
///
/// Early scans (few prior scans, or a small project) always get a full
/// relearn since there isn't enough history to trust a partial pass. Once a
/// project has matured past warmup, the mode follows how much of the
/// codebase changed since the last scan.
pub fn determine_mode(scan_count: u64, total_files: u64, changed_ratio: f64) -> LearningMode {
    if scan_count < WARMUP_SCANS || total_files < MIN_TOTAL_FILES {
        return LearningMode::Full;
    }

    if changed_ratio <= drift_core::constants::INCREMENTAL_REUSE_CEILING {
        LearningMode::Reuse
    } else if changed_ratio <= drift_core::constants::INCREMENTAL_PARTIAL_CEILING {
        LearningMode::Incremental
    } else {
        LearningMode::Full
    }
}
