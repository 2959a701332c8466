//! `IDriftStructural` trait — contract tracking and cryptographic finding storage.
//!
//! Maps to `drift-storage/src/queries/structural.rs`.

use crate::errors::StorageError;
use std::sync::Arc;

// ─── Row Types ──────────────────────────────────────────────────────

/// `operations_json`, `types_json`, and `consumers_json` are serde_json
/// arrays; `provenance_json` is the serialized `Provenance` enum. Nested
/// contract structure is stored as JSON rather than normalized across
/// tables, matching `endpoints` on the teacher's original row.
#[derive(Debug, Clone)]
pub struct ContractRow {
    pub id: String,
    pub paradigm: String,
    pub service_name: Option<String>,
    pub status: String,
    pub confidence: f64,
    pub provenance_json: String,
    pub operations_json: String,
    pub types_json: String,
    pub consumers_json: String,
}

#[derive(Debug, Clone)]
pub struct ContractMismatchRow {
    pub id: i64,
    pub contract_id: String,
    pub field_path: String,
    pub mismatch_type: String,
    pub severity: String,
    pub description: String,
    pub provider_value: Option<String>,
    pub consumer_value: Option<String>,
    pub created_at: i64,
}

/// `content_hash` is stored bit-reinterpreted as `i64` (`hash as i64` /
/// `v as u64`), since SQLite integers are signed 64-bit.
/// `additional_cwe_ids` is a serde_json array of `u32`.
#[derive(Debug, Clone)]
pub struct CryptoFindingRow {
    pub id: Option<i64>,
    pub pattern_id: String,
    pub file: String,
    pub line: u32,
    pub category: String,
    pub description: String,
    pub evidence: String,
    pub confidence: f64,
    pub cwe_id: u32,
    pub additional_cwe_ids: String,
    pub owasp: String,
    pub remediation: String,
    pub remediation_snippet: Option<String>,
    pub language: String,
    pub library: Option<String>,
    pub algorithm: Option<String>,
    pub security_context: bool,
    pub severity: String,
    pub content_hash: i64,
}

// ─── Trait ───────────────────────────────────────────────────────────

/// Structural intelligence storage operations: contracts, contract
/// mismatches, and cryptographic findings.
pub trait IDriftStructural: Send + Sync {
    // ── contracts ──

    fn upsert_contract(&self, row: &ContractRow) -> Result<(), StorageError>;
    fn get_contract(&self, id: &str) -> Result<Option<ContractRow>, StorageError>;
    fn get_contracts_by_paradigm(&self, paradigm: &str) -> Result<Vec<ContractRow>, StorageError>;

    // ── contract_mismatches ──

    fn insert_contract_mismatch(&self, row: &ContractMismatchRow) -> Result<(), StorageError>;
    fn query_contract_mismatches(&self) -> Result<Vec<ContractMismatchRow>, StorageError>;
    fn query_contract_mismatches_by_type(&self, mismatch_type: &str) -> Result<Vec<ContractMismatchRow>, StorageError>;

    // ── crypto_findings ──

    fn insert_crypto_finding(&self, row: &CryptoFindingRow) -> Result<i64, StorageError>;
    fn get_crypto_findings_by_file(&self, file: &str) -> Result<Vec<CryptoFindingRow>, StorageError>;
    fn get_crypto_findings_by_category(&self, category: &str) -> Result<Vec<CryptoFindingRow>, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IDriftStructural + ?Sized> IDriftStructural for Arc<T> {
    fn upsert_contract(&self, row: &ContractRow) -> Result<(), StorageError> { (**self).upsert_contract(row) }
    fn get_contract(&self, id: &str) -> Result<Option<ContractRow>, StorageError> { (**self).get_contract(id) }
    fn get_contracts_by_paradigm(&self, p: &str) -> Result<Vec<ContractRow>, StorageError> { (**self).get_contracts_by_paradigm(p) }
    fn insert_contract_mismatch(&self, row: &ContractMismatchRow) -> Result<(), StorageError> { (**self).insert_contract_mismatch(row) }
    fn query_contract_mismatches(&self) -> Result<Vec<ContractMismatchRow>, StorageError> { (**self).query_contract_mismatches() }
    fn query_contract_mismatches_by_type(&self, mt: &str) -> Result<Vec<ContractMismatchRow>, StorageError> { (**self).query_contract_mismatches_by_type(mt) }
    fn insert_crypto_finding(&self, row: &CryptoFindingRow) -> Result<i64, StorageError> { (**self).insert_crypto_finding(row) }
    fn get_crypto_findings_by_file(&self, file: &str) -> Result<Vec<CryptoFindingRow>, StorageError> { (**self).get_crypto_findings_by_file(file) }
    fn get_crypto_findings_by_category(&self, cat: &str) -> Result<Vec<CryptoFindingRow>, StorageError> { (**self).get_crypto_findings_by_category(cat) }
}
