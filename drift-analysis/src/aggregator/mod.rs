//! Result aggregator: deduplicates findings, enriches them with catalog
//! identifiers, and rolls up project-level health and contract coverage.
//!
//! Distinct from `patterns::aggregation`, which collapses raw pattern
//! matches into `AggregatedPattern`s for convention learning — this module
//! operates one stage later, after detection, on the crypto findings and
//! contracts that make up a scan's final output.

use std::collections::HashSet;

use crate::contracts::{Contract, ContractStatus};
use crate::structural::crypto::{compute_health, CryptoFinding, HealthReport};

/// Project-level rollup produced at the end of a scan.
pub struct ProjectSummary {
    pub crypto_health: HealthReport,
    pub contract_coverage: ContractCoverage,
    pub deduplicated_findings: usize,
    pub duplicate_findings_dropped: usize,
}

/// Fraction of discovered contracts that have been verified, plus a
/// mismatch count for quick triage.
pub struct ContractCoverage {
    pub total_contracts: usize,
    pub verified_contracts: usize,
    pub mismatched_contracts: usize,
    pub coverage_ratio: f64,
}

/// Drop findings that share the same file, line, category, and content
/// hash — the same evidence re-detected across overlapping pattern rules
/// or re-scanned unchanged files.
pub fn dedupe_crypto_findings(findings: Vec<CryptoFinding>) -> Vec<CryptoFinding> {
    let mut seen = HashSet::new();
    findings
        .into_iter()
        .filter(|f| seen.insert((f.file.clone(), f.line, f.category, f.content_hash)))
        .collect()
}

fn compute_contract_coverage(contracts: &[Contract]) -> ContractCoverage {
    let total_contracts = contracts.len();
    let verified_contracts = contracts.iter().filter(|c| c.status == ContractStatus::Verified).count();
    let mismatched_contracts = contracts.iter().filter(|c| c.status == ContractStatus::Mismatch).count();
    let coverage_ratio = if total_contracts == 0 {
        1.0
    } else {
        verified_contracts as f64 / total_contracts as f64
    };

    ContractCoverage { total_contracts, verified_contracts, mismatched_contracts, coverage_ratio }
}

/// Finalize a scan's crypto findings and discovered contracts into a single
/// project-level summary: dedup first, then roll up health and coverage
/// over the deduplicated set.
pub fn summarize(crypto_findings: Vec<CryptoFinding>, contracts: &[Contract], file_count: usize) -> ProjectSummary {
    let before = crypto_findings.len();
    let deduplicated = dedupe_crypto_findings(crypto_findings);
    let after = deduplicated.len();

    ProjectSummary {
        crypto_health: compute_health(&deduplicated, file_count),
        contract_coverage: compute_contract_coverage(contracts),
        deduplicated_findings: after,
        duplicate_findings_dropped: before - after,
    }
}
