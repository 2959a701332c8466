//! Contract tracking: extracts API contracts from spec files and code-first
//! route declarations, normalizes and compares them across paradigms, and
//! classifies breaking changes between scans.

pub mod breaking_change;
pub mod code_first;
pub mod confidence;
pub mod field_compare;
pub mod path_normalize;
pub mod path_similarity;
pub mod spec_parsers;
pub mod types;

pub use types::{
    BreakingChange, BreakingChangeType, BreakingSeverity, Contract, ContractField,
    ContractMismatch, ContractOperation, ContractStatus, ContractType, MismatchSeverity,
    MismatchType, Paradigm, Provenance, SpecType,
};
