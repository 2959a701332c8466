//! Default thresholds for convention learning, confidence scoring, and
//! enforcement. Every constant here has a corresponding `Option<T>` override
//! in a `*Config` struct in [`crate::config`] — these are the values used
//! when the config field is absent.

/// Beta(1,1) prior — uniform before any evidence.
pub const PRIOR_ALPHA: f64 = 1.0;
pub const PRIOR_BETA: f64 = 1.0;

/// Classification thresholds (spec §4.3 "Classification").
pub const UNIVERSAL_FREQUENCY: f64 = 0.90;
pub const PROJECT_SPECIFIC_FREQUENCY_LOW: f64 = 0.60;
pub const PROJECT_SPECIFIC_FREQUENCY_HIGH: f64 = 0.90;
pub const LEGACY_FREQUENCY_LOW: f64 = 0.30;
pub const LEGACY_FREQUENCY_HIGH: f64 = 0.90;
pub const EMERGING_FREQUENCY: f64 = 0.60;

/// Contested-pair detection (spec §3 "Contested pair").
pub const CONTESTED_THRESHOLD: f64 = 0.15;
pub const MIN_CONTESTED_FREQUENCY: f64 = 0.25;

/// Trend computation (spec §4.3 "Trend computation").
pub const TREND_RISING_DELTA: f64 = 0.05;
pub const TREND_DECLINING_DELTA: f64 = -0.05;

/// Enforcement minimum-evidence gate (spec §4.3 "Enforcement").
pub const ENFORCEMENT_MIN_FILES: u32 = 5;
pub const ENFORCEMENT_MIN_OCCURRENCES: u32 = 10;
pub const ENFORCEMENT_MIN_CONFIDENCE: f64 = 0.7;

/// Confidence scorer factor age window (spec §4.2 "Confidence scorer").
pub const MIN_AGE_FACTOR: f64 = 0.1;
pub const MAX_AGE_DAYS: f64 = 30.0;

/// Confidence scorer weighted-factor blend weights.
pub const WEIGHT_FREQUENCY: f64 = 0.30;
pub const WEIGHT_CONSISTENCY: f64 = 0.25;
pub const WEIGHT_AGE: f64 = 0.10;
pub const WEIGHT_SPREAD: f64 = 0.15;
pub const WEIGHT_MOMENTUM: f64 = 0.20;

/// v1 backward-compatible score weights.
pub const V1_WEIGHT_FREQUENCY: f64 = 0.40;
pub const V1_WEIGHT_CONSISTENCY: f64 = 0.30;
pub const V1_WEIGHT_AGE: f64 = 0.15;
pub const V1_WEIGHT_SPREAD: f64 = 0.15;

/// Posterior weight cap and half-saturation point (`n_effective / (n_effective + K)`).
pub const POSTERIOR_WEIGHT_CAP: f64 = 0.5;
pub const POSTERIOR_HALF_SATURATION: f64 = 10.0;

/// Confidence tier thresholds (spec §4.2 "Tiers").
pub const ESTABLISHED_MEAN: f64 = 0.7;
pub const ESTABLISHED_CI_WIDTH: f64 = 0.15;
pub const EMERGING_MEAN: f64 = 0.5;
pub const EMERGING_CI_WIDTH: f64 = 0.25;
pub const TENTATIVE_MEAN: f64 = 0.3;
pub const TENTATIVE_CI_WIDTH: f64 = 0.40;

/// Feedback-event posterior adjustment weights (spec §4.2 "Feedback events").
pub const FEEDBACK_FIXED_ALPHA: f64 = 0.1;
pub const FEEDBACK_IGNORED_BETA: f64 = 0.05;
pub const FEEDBACK_REJECTED_BETA: f64 = 0.1;

/// Convention expiry: no update within this many days of the last observation.
pub const CONVENTION_RETENTION_DAYS: u32 = 7;

/// Incremental relearn policy change-ratio gates (spec §4.1 "Incremental policy").
pub const INCREMENTAL_REUSE_CEILING: f64 = 0.10;
pub const INCREMENTAL_PARTIAL_CEILING: f64 = 0.30;

/// Contract-engine path-similarity weights (spec §4.4 "Path similarity").
pub const PATH_SIM_WEIGHT_JACCARD: f64 = 0.30;
pub const PATH_SIM_WEIGHT_SEGMENT_COUNT: f64 = 0.15;
pub const PATH_SIM_WEIGHT_SUFFIX: f64 = 0.20;
pub const PATH_SIM_WEIGHT_RESOURCE_NAME: f64 = 0.25;
pub const PATH_SIM_WEIGHT_PARAM_ALIGNMENT: f64 = 0.10;

/// Contract-engine confidence signal weights (spec §4.4 "Contract confidence").
pub const CONTRACT_WEIGHT_MATCH: f64 = 0.25;
pub const CONTRACT_WEIGHT_EXTRACTION: f64 = 0.20;
pub const CONTRACT_WEIGHT_SOURCE_QUALITY: f64 = 0.20;
pub const CONTRACT_WEIGHT_TEST_COVERAGE: f64 = 0.10;
pub const CONTRACT_WEIGHT_STABILITY: f64 = 0.10;
pub const CONTRACT_WEIGHT_USAGE_FREQUENCY: f64 = 0.05;
pub const CONTRACT_WEIGHT_CROSS_VALIDATION: f64 = 0.10;
pub const CONTRACT_STALENESS_DECAY_RATE: f64 = 0.01;
pub const CONTRACT_NEVER_VERIFIED_PENALTY: f64 = 0.05;

/// Crypto key-size / iteration minimums (spec §4.5 "Argument-check rules").
pub const MIN_RSA_KEY_BITS: u32 = 2048;
pub const MIN_ECC_KEY_BITS: u32 = 256;
pub const MIN_AES_KEY_BITS: u32 = 128;
pub const MIN_PBKDF2_ITERATIONS: u32 = 600_000;
pub const MIN_BCRYPT_COST: u32 = 10;

/// Crypto finding confidence signal weights (spec §4.5 "Confidence").
pub const CRYPTO_WEIGHT_BASE: f64 = 0.35;
pub const CRYPTO_WEIGHT_IMPORT_CONFIRMED: f64 = 0.25;
pub const CRYPTO_WEIGHT_ARG_VALIDATED: f64 = 0.25;
pub const CRYPTO_WEIGHT_SECURITY_CONTEXT: f64 = 0.15;
pub const CRYPTO_CONFIDENCE_MIN: f64 = 0.1;
pub const CRYPTO_CONFIDENCE_MAX: f64 = 0.99;

/// Crypto health-score per-severity penalties (spec §4.5 "Health score").
pub const PENALTY_CRITICAL: f64 = 10.0;
pub const PENALTY_HIGH: f64 = 5.0;
pub const PENALTY_MEDIUM: f64 = 2.0;
pub const PENALTY_LOW: f64 = 0.5;
pub const PENALTY_INFO: f64 = 0.1;

/// Default scanner max file size: 1 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;
