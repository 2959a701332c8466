//! Contract model: paradigms, operations, types, mismatches, and breaking
//! changes shared by the spec parsers, code-first extractors, and comparison
//! passes in this module.

use std::collections::HashMap;

/// The API paradigm a contract was extracted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paradigm {
    Rest,
    GraphQL,
    Grpc,
    WebSocket,
    EventDriven,
    TypedProcedure,
}

/// Where a contract's evidence came from.
#[derive(Debug, Clone)]
pub enum Provenance {
    CodeExtraction { file: String, line: u32, framework: String },
    SpecFile { spec_type: SpecType, version: String },
    ContractTest,
    Both { code_file: String, code_line: u32, framework: String, spec_type: SpecType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecType {
    OpenApi,
    GraphQLSchema,
    Protobuf,
    AsyncApi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    Discovered,
    Verified,
    Mismatch,
    Ignored,
    Deprecated,
}

/// One API contract: a named operation set under a single paradigm.
#[derive(Debug, Clone)]
pub struct Contract {
    pub id: String,
    pub paradigm: Paradigm,
    pub service_name: Option<String>,
    pub operations: Vec<ContractOperation>,
    pub types: Vec<ContractType>,
    pub provenance: Provenance,
    pub status: ContractStatus,
    pub confidence: f64,
    pub consumers: Vec<String>,
    pub mismatches: Vec<ContractMismatch>,
    pub breaking_changes: Vec<BreakingChange>,
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
}

#[derive(Debug, Clone)]
pub struct OperationParameter {
    pub name: String,
    pub location: ParamLocation,
    pub type_ref: String,
    pub required: bool,
    pub default: Option<String>,
}

/// Paradigm-specific variant of an operation's own identity.
#[derive(Debug, Clone)]
pub enum OperationKind {
    Rest { method: String, path: String },
    GraphQL { operation_name: String, operation_kind: String },
    Grpc { service: String, method: String },
    EventDriven { channel: String, event: String },
    WebSocket { channel: String },
    TypedProcedure { procedure: String },
}

#[derive(Debug, Clone)]
pub struct ContractOperation {
    pub name: String,
    pub kind: OperationKind,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
    pub parameters: Vec<OperationParameter>,
    pub auth_required: bool,
    pub deprecated: bool,
    pub deprecation_note: Option<String>,
    pub source_file: String,
    pub source_line: u32,
}

/// Canonical scalar set every language-specific type name is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Binary,
    Null,
    Any,
}

#[derive(Debug, Clone)]
pub struct FieldConstraints {
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub unique: bool,
}

impl Default for FieldConstraints {
    fn default() -> Self {
        FieldConstraints {
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            pattern: None,
            format: None,
            unique: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractField {
    pub name: String,
    pub type_kind: Box<ContractType>,
    pub required: bool,
    pub nullable: bool,
    pub default: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub constraints: FieldConstraints,
    pub source_line: Option<u32>,
}

#[derive(Debug, Clone)]
pub enum ContractType {
    Object { name: String, fields: Vec<ContractField> },
    Enum { name: String, values: Vec<String> },
    Union { name: String, variants: Vec<String> },
    Array { element: Box<ContractType> },
    Map { key: Box<ContractType>, value: Box<ContractType> },
    Scalar(ScalarType),
    Reference(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchType {
    MissingInConsumer,
    MissingInProvider,
    TypeMismatch,
    OptionalityMismatch,
    NullabilityMismatch,
    EnumMismatch,
    ConstraintMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MismatchSeverity {
    Info,
    Warning,
    Error,
}

impl MismatchType {
    /// Fixed severity table from the contract engine's field-comparison rules.
    pub fn severity(&self) -> MismatchSeverity {
        match self {
            MismatchType::MissingInProvider | MismatchType::TypeMismatch => MismatchSeverity::Error,
            MismatchType::MissingInConsumer
            | MismatchType::OptionalityMismatch
            | MismatchType::NullabilityMismatch
            | MismatchType::EnumMismatch => MismatchSeverity::Warning,
            MismatchType::ConstraintMismatch => MismatchSeverity::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractMismatch {
    pub field_path: String,
    pub mismatch_type: MismatchType,
    pub severity: MismatchSeverity,
    pub description: String,
    pub provider_value: Option<String>,
    pub consumer_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakingChangeType {
    OperationRemoved,
    OperationAdded,
    OperationRenamed,
    RequiredFieldAdded,
    OptionalFieldAdded,
    FieldRemoved,
    FieldTypeChanged,
    FieldRequirednessChanged,
    FieldNullabilityChanged,
    EnumValueAdded,
    EnumValueRemoved,
    TypeRemoved,
    TypeRenamed,
    AuthRequirementAdded,
    AuthRequirementRemoved,
    ProtoFieldNumberReused,
    ProtoFieldNumberChanged,
    GraphQLArgumentAdded,
    GraphQLNullabilityTightened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakingSeverity {
    Breaking,
    Conditional,
    NonBreaking,
    Deprecation,
}

#[derive(Debug, Clone)]
pub struct BreakingChange {
    pub change_type: BreakingChangeType,
    pub severity: BreakingSeverity,
    pub paradigm: Paradigm,
    pub operation: String,
    pub field_path: Option<String>,
    pub description: String,
    pub before: Option<String>,
    pub after: Option<String>,
    pub migration_hint: Option<String>,
}

/// The seven independent signals `confidence.rs` weights and decays.
#[derive(Debug, Clone)]
pub struct ConfidenceSignals {
    pub match_confidence: f64,
    pub extraction_confidence: f64,
    pub source_quality: f64,
    pub test_coverage: f64,
    pub historical_stability: f64,
    pub usage_frequency: f64,
    pub cross_validation: f64,
    pub days_since_last_verified: Option<f64>,
}

/// A raw operation emitted by a code-first extractor, before path
/// normalization and field typing are applied.
#[derive(Debug, Clone)]
pub struct ExtractedOperation {
    pub raw_path: String,
    pub method: String,
    pub framework: String,
    pub file: String,
    pub line: u32,
    pub parameters: Vec<OperationParameter>,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
}

pub type FieldSet = HashMap<String, ContractField>;
