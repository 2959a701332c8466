//! Hand-rolled GraphQL SDL extractor.
//!
//! No crate in the dependency stack parses GraphQL SDL, so declarations are
//! recovered with line-oriented regex scanning, the same idiom used by
//! `structural::crypto::patterns` and `frameworks::matcher`.

use std::sync::OnceLock;

use regex::Regex;

use crate::contracts::types::{
    Contract, ContractField, ContractOperation, ContractStatus, ContractType, FieldConstraints,
    OperationKind, Paradigm, Provenance, ScalarType, SpecType,
};

fn type_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*type\s+(\w+)(?:\s+implements\s+[\w&\s]+)?\s*\{").unwrap())
}

fn enum_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*enum\s+(\w+)\s*\{").unwrap())
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\w+)\s*(\([^)]*\))?\s*:\s*(\[?!?[\w]+!?\]?!?)\s*(?:#.*)?$").unwrap()
    })
}

/// Parse a GraphQL SDL document into a `Contract` with one operation per
/// field declared on `Query`, `Mutation`, or `Subscription`, and one
/// `ContractType` per other `type`/`enum` declaration.
pub fn parse(sdl: &str) -> Contract {
    let mut types = Vec::new();
    let mut operations = Vec::new();

    let mut lines = sdl.lines().enumerate().peekable();
    while let Some((idx, line)) = lines.next() {
        if let Some(caps) = type_decl_re().captures(line) {
            let type_name = caps[1].to_string();
            let (fields, consumed) = collect_fields(sdl, idx);
            for _ in 0..consumed {
                lines.next();
            }

            if matches!(type_name.as_str(), "Query" | "Mutation" | "Subscription") {
                let op_kind = type_name.clone();
                operations.extend(fields.into_iter().map(|f| {
                    field_to_operation(&op_kind, idx, f)
                }));
            } else {
                types.push(ContractType::Object {
                    name: type_name,
                    fields: fields.into_iter().map(|f| field_to_contract_field(f, idx)).collect(),
                });
            }
        } else if let Some(caps) = enum_decl_re().captures(line) {
            let name = caps[1].to_string();
            let (values, consumed) = collect_enum_values(sdl, idx);
            for _ in 0..consumed {
                lines.next();
            }
            types.push(ContractType::Enum { name, values });
        }
    }

    Contract {
        id: "graphql:schema".to_string(),
        paradigm: Paradigm::GraphQL,
        service_name: None,
        operations,
        types,
        provenance: Provenance::SpecFile { spec_type: SpecType::GraphQLSchema, version: "1".to_string() },
        status: ContractStatus::Discovered,
        confidence: 0.0,
        consumers: Vec::new(),
        mismatches: Vec::new(),
        breaking_changes: Vec::new(),
    }
}

struct RawField {
    name: String,
    type_str: String,
}

fn collect_fields(sdl: &str, start_line: usize) -> (Vec<RawField>, usize) {
    let mut fields = Vec::new();
    let mut consumed = 0;
    for line in sdl.lines().skip(start_line + 1) {
        consumed += 1;
        let trimmed = line.trim();
        if trimmed.starts_with('}') {
            break;
        }
        if let Some(caps) = field_re().captures(trimmed) {
            fields.push(RawField { name: caps[1].to_string(), type_str: caps[3].to_string() });
        }
    }
    (fields, consumed)
}

fn collect_enum_values(sdl: &str, start_line: usize) -> (Vec<String>, usize) {
    let mut values = Vec::new();
    let mut consumed = 0;
    for line in sdl.lines().skip(start_line + 1) {
        consumed += 1;
        let trimmed = line.trim();
        if trimmed.starts_with('}') {
            break;
        }
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            values.push(trimmed.trim_end_matches(',').to_string());
        }
    }
    (values, consumed)
}

fn field_to_operation(op_kind: &str, line: usize, field: RawField) -> ContractOperation {
    let operation_kind = match op_kind {
        "Query" => "query",
        "Mutation" => "mutation",
        _ => "subscription",
    };
    ContractOperation {
        name: field.name.clone(),
        kind: OperationKind::GraphQL {
            operation_name: field.name,
            operation_kind: operation_kind.to_string(),
        },
        input_type: None,
        output_type: Some(strip_graphql_wrappers(&field.type_str)),
        parameters: Vec::new(),
        auth_required: false,
        deprecated: false,
        deprecation_note: None,
        source_file: "schema.graphql".to_string(),
        source_line: line as u32 + 1,
    }
}

fn field_to_contract_field(field: RawField, line: usize) -> ContractField {
    let required = field.type_str.ends_with('!');
    let scalar_name = strip_graphql_wrappers(&field.type_str);
    let type_kind = if field.type_str.trim_end_matches('!').starts_with('[') {
        ContractType::Array { element: Box::new(to_contract_type(&scalar_name)) }
    } else {
        to_contract_type(&scalar_name)
    };
    ContractField {
        name: field.name,
        type_kind: Box::new(type_kind),
        required,
        nullable: !required,
        default: None,
        description: None,
        deprecated: false,
        constraints: FieldConstraints::default(),
        source_line: Some(line as u32 + 1),
    }
}

fn strip_graphql_wrappers(type_str: &str) -> String {
    type_str.trim_matches(|c| c == '[' || c == ']' || c == '!').to_string()
}

fn to_contract_type(name: &str) -> ContractType {
    match name {
        "String" | "ID" => ContractType::Scalar(ScalarType::String),
        "Int" | "Float" => ContractType::Scalar(ScalarType::Float),
        "Boolean" => ContractType::Scalar(ScalarType::Boolean),
        _ => ContractType::Reference(name.to_string()),
    }
}
