//! Crypto finding model: categories, severities, and the emitted finding
//! shape the detector, confidence scorer, and health-score pass share.

/// One of the 14 cryptographic anti-pattern categories the engine detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CryptoCategory {
    WeakHash,
    DeprecatedCipher,
    HardcodedKey,
    EcbMode,
    StaticIv,
    InsufficientKeyLen,
    DisabledTls,
    InsecureRandom,
    JwtConfusion,
    PlaintextPassword,
    WeakKdf,
    MissingEncryption,
    CertPinningBypass,
    NonceReuse,
}

impl CryptoCategory {
    /// Primary well-known weakness identifier this category maps to.
    pub fn cwe_id(&self) -> u32 {
        match self {
            CryptoCategory::WeakHash => 328,
            CryptoCategory::DeprecatedCipher => 327,
            CryptoCategory::HardcodedKey => 321,
            CryptoCategory::EcbMode => 327,
            CryptoCategory::StaticIv => 329,
            CryptoCategory::InsufficientKeyLen => 326,
            CryptoCategory::DisabledTls => 295,
            CryptoCategory::InsecureRandom => 338,
            CryptoCategory::JwtConfusion => 347,
            CryptoCategory::PlaintextPassword => 256,
            CryptoCategory::WeakKdf => 916,
            CryptoCategory::MissingEncryption => 311,
            CryptoCategory::CertPinningBypass => 297,
            CryptoCategory::NonceReuse => 323,
        }
    }

    /// Base severity before context adjustment.
    pub fn base_severity(&self) -> Severity {
        match self {
            CryptoCategory::WeakHash => Severity::High,
            CryptoCategory::DeprecatedCipher => Severity::High,
            CryptoCategory::HardcodedKey => Severity::Critical,
            CryptoCategory::EcbMode => Severity::High,
            CryptoCategory::StaticIv => Severity::High,
            CryptoCategory::InsufficientKeyLen => Severity::High,
            CryptoCategory::DisabledTls => Severity::Critical,
            CryptoCategory::InsecureRandom => Severity::Medium,
            CryptoCategory::JwtConfusion => Severity::Critical,
            CryptoCategory::PlaintextPassword => Severity::Critical,
            CryptoCategory::WeakKdf => Severity::High,
            CryptoCategory::MissingEncryption => Severity::High,
            CryptoCategory::CertPinningBypass => Severity::Critical,
            CryptoCategory::NonceReuse => Severity::High,
        }
    }
}

/// Finding severity. Ordered low to high; drives both the health-score
/// penalty and the letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Per-finding penalty subtracted from a project's health score.
    pub fn penalty(&self) -> f64 {
        match self {
            Severity::Critical => 10.0,
            Severity::High => 5.0,
            Severity::Medium => 2.0,
            Severity::Low => 0.5,
            Severity::Info => 0.1,
        }
    }
}

/// One cryptographic failure found at a specific location.
#[derive(Debug, Clone)]
pub struct CryptoFinding {
    pub pattern_id: String,
    pub file: String,
    pub line: u32,
    pub category: CryptoCategory,
    pub description: String,
    /// The matched source line.
    pub evidence: String,
    pub confidence: f32,
    /// Primary weakness identifier for `category`.
    pub cwe_id: u32,
    /// Any further weakness identifiers beyond the primary one.
    pub additional_cwe_ids: Vec<u32>,
    pub owasp: String,
    pub remediation: String,
    pub remediation_snippet: Option<String>,
    pub language: String,
    /// The library the matched call belongs to, when known (e.g. `hashlib`,
    /// `Crypto.Cipher`, `javax.crypto`).
    pub library: Option<String>,
    /// The specific algorithm named by the matched call, when the pattern
    /// identifies one (e.g. `MD5`, `DES`, `RC4`).
    pub algorithm: Option<String>,
    pub security_context: bool,
    pub severity: Severity,
    /// Content hash of the file this finding was produced from, for
    /// content-hash invalidation in the store.
    pub content_hash: u64,
}
