//! Cryptographic failure detection: a per-language pattern table of call
//! shapes spanning 14 anti-pattern categories, each gated by a named
//! argument-check rule, context-adjusted severity, and a weighted confidence
//! score, rolled up into a project health score.

mod confidence;
mod detector;
mod health;
mod patterns;
mod remediation;
mod severity;
mod types;

pub use confidence::{compute as compute_confidence, ConfidenceInputs};
pub use detector::CryptoDetector;
pub use health::{compute as compute_health, CategoryBreakdown, HealthReport};
pub use patterns::{ArgCheckRule, CryptoPattern, CRYPTO_IMPORT_INDICATORS, CRYPTO_PATTERNS};
pub use severity::{adjust as adjust_severity, SeverityContext};
pub use types::{CryptoCategory, CryptoFinding, Severity};

use std::collections::HashMap;

/// A sensitive field discovered by boundary detection (external to this
/// core), and the encryption-wrapper call paths observed in the codebase.
/// `cross_reference_missing_encryption` correlates the two to flag sensitive
/// fields with no encryption function anywhere on their data-flow path.
pub struct SensitiveField {
    pub file: String,
    pub line: u32,
    pub field_name: String,
}

/// One function/method path known to perform encryption (e.g.
/// `Cipher.encrypt`, `Fernet.encrypt`), keyed by file.
pub struct EncryptionWrapperUsage {
    pub file: String,
}

/// Sensitive fields with no encryption-wrapper usage anywhere in their file
/// become `MissingEncryption` findings.
pub fn cross_reference_missing_encryption(
    sensitive_fields: &[SensitiveField],
    wrapper_usages: &[EncryptionWrapperUsage],
) -> Vec<CryptoFinding> {
    let mut encrypted_files: HashMap<&str, ()> = HashMap::new();
    for usage in wrapper_usages {
        encrypted_files.insert(usage.file.as_str(), ());
    }

    sensitive_fields
        .iter()
        .filter(|field| !encrypted_files.contains_key(field.file.as_str()))
        .map(|field| {
            let (remediation, remediation_snippet) =
                remediation::get_remediation(CryptoCategory::MissingEncryption);
            CryptoFinding {
                pattern_id: "crypto/missing-encryption/cross-reference".to_string(),
                file: field.file.clone(),
                line: field.line,
                category: CryptoCategory::MissingEncryption,
                description: format!(
                    "sensitive field '{}' has no encryption on its data-flow path",
                    field.field_name
                ),
                evidence: field.field_name.clone(),
                confidence: 0.6,
                cwe_id: CryptoCategory::MissingEncryption.cwe_id(),
                additional_cwe_ids: Vec::new(),
                owasp: "A02:2025".to_string(),
                remediation,
                remediation_snippet,
                language: "unknown".to_string(),
                library: None,
                algorithm: None,
                security_context: false,
                severity: CryptoCategory::MissingEncryption.base_severity(),
                content_hash: 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unencrypted_sensitive_field_is_flagged() {
        let fields = vec![SensitiveField {
            file: "src/models/user.py".to_string(),
            line: 10,
            field_name: "ssn".to_string(),
        }];
        let findings = cross_reference_missing_encryption(&fields, &[]);
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0].category, CryptoCategory::MissingEncryption));
    }

    #[test]
    fn encrypted_file_is_not_flagged() {
        let fields = vec![SensitiveField {
            file: "src/models/user.py".to_string(),
            line: 10,
            field_name: "ssn".to_string(),
        }];
        let usages = vec![EncryptionWrapperUsage { file: "src/models/user.py".to_string() }];
        assert!(cross_reference_missing_encryption(&fields, &usages).is_empty());
    }
}
