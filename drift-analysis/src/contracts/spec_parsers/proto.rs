//! Hand-rolled protobuf IDL extractor.
//!
//! Neither `prost` nor `protobuf` parse `.proto` text into a declaration
//! tree (they codegen from it at build time), so messages, services, and
//! field numbers are recovered with line-oriented regex scanning, mirroring
//! `spec_parsers::graphql`.

use std::sync::OnceLock;

use regex::Regex;

use crate::contracts::types::{
    Contract, ContractField, ContractOperation, ContractStatus, ContractType, FieldConstraints,
    OperationKind, Paradigm, Provenance, ScalarType, SpecType,
};

fn message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*message\s+(\w+)\s*\{").unwrap())
}

fn service_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*service\s+(\w+)\s*\{").unwrap())
}

fn rpc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*rpc\s+(\w+)\s*\(\s*(stream\s+)?(\w+)\s*\)\s*returns\s*\(\s*(stream\s+)?(\w+)\s*\)").unwrap()
    })
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(repeated\s+|optional\s+)?(\w+)\s+(\w+)\s*=\s*(\d+)\s*;").unwrap()
    })
}

/// Parse a protobuf IDL document into a `Contract`: one operation per `rpc`
/// inside a `service` block, one `ContractType::Object` per `message`.
pub fn parse(proto_source: &str, service_hint: &str) -> Contract {
    let mut types = Vec::new();
    let mut operations = Vec::new();

    let mut lines = proto_source.lines().enumerate().peekable();
    let mut current_service = service_hint.to_string();

    while let Some((idx, line)) = lines.next() {
        if let Some(caps) = message_re().captures(line) {
            let name = caps[1].to_string();
            let (fields, consumed) = collect_message_fields(proto_source, idx);
            for _ in 0..consumed {
                lines.next();
            }
            types.push(ContractType::Object { name, fields });
        } else if let Some(caps) = service_re().captures(line) {
            current_service = caps[1].to_string();
        } else if let Some(caps) = rpc_re().captures(line) {
            operations.push(ContractOperation {
                name: caps[1].to_string(),
                kind: OperationKind::Grpc { service: current_service.clone(), method: caps[1].to_string() },
                input_type: Some(caps[3].to_string()),
                output_type: Some(caps[5].to_string()),
                parameters: Vec::new(),
                auth_required: false,
                deprecated: false,
                deprecation_note: None,
                source_file: "service.proto".to_string(),
                source_line: idx as u32 + 1,
            });
        }
    }

    Contract {
        id: format!("protobuf:{service_hint}"),
        paradigm: Paradigm::Grpc,
        service_name: Some(service_hint.to_string()),
        operations,
        types,
        provenance: Provenance::SpecFile { spec_type: SpecType::Protobuf, version: "proto3".to_string() },
        status: ContractStatus::Discovered,
        confidence: 0.0,
        consumers: Vec::new(),
        mismatches: Vec::new(),
        breaking_changes: Vec::new(),
    }
}

/// Field number is carried in `source_line` (repurposed as the proto field
/// tag rather than a text line), needed for `ProtoFieldNumberReused`/
/// `ProtoFieldNumberChanged` breaking-change detection.
fn collect_message_fields(proto_source: &str, start_line: usize) -> (Vec<ContractField>, usize) {
    let mut fields = Vec::new();
    let mut consumed = 0;
    for line in proto_source.lines().skip(start_line + 1) {
        consumed += 1;
        let trimmed = line.trim();
        if trimmed.starts_with('}') {
            break;
        }
        if let Some(caps) = field_re().captures(trimmed) {
            let repeated = caps.get(1).is_some_and(|m| m.as_str().trim() == "repeated");
            let proto_type = &caps[2];
            let field_name = caps[3].to_string();
            let field_number: u32 = caps[4].parse().unwrap_or(0);

            let scalar = to_scalar(proto_type);
            let type_kind = if repeated {
                ContractType::Array { element: Box::new(scalar) }
            } else {
                scalar
            };

            fields.push(ContractField {
                name: field_name,
                type_kind: Box::new(type_kind),
                required: true,
                nullable: false,
                default: None,
                description: None,
                deprecated: false,
                constraints: FieldConstraints::default(),
                source_line: Some(field_number),
            });
        }
    }
    (fields, consumed)
}

fn to_scalar(proto_type: &str) -> ContractType {
    match proto_type {
        "string" => ContractType::Scalar(ScalarType::String),
        "bytes" => ContractType::Scalar(ScalarType::Binary),
        "bool" => ContractType::Scalar(ScalarType::Boolean),
        "int32" | "int64" | "uint32" | "uint64" | "sint32" | "sint64" | "fixed32" | "fixed64" => {
            ContractType::Scalar(ScalarType::Integer)
        }
        "float" | "double" => ContractType::Scalar(ScalarType::Float),
        other => ContractType::Reference(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTO: &str = r#"
service PetService {
  rpc GetPet (GetPetRequest) returns (Pet);
  rpc ListPets (ListPetsRequest) returns (stream Pet);
}

message Pet {
  string id = 1;
  string name = 2;
  repeated string tags = 3;
}
"#;

    #[test]
    fn extracts_rpc_methods_as_grpc_operations() {
        let contract = parse(PROTO, "PetService");
        assert_eq!(contract.operations.len(), 2);
        match &contract.operations[0].kind {
            OperationKind::Grpc { service, method } => {
                assert_eq!(service, "PetService");
                assert_eq!(method, "GetPet");
            }
            _ => panic!("expected grpc operation kind"),
        }
    }

    #[test]
    fn extracts_message_fields_with_numbers() {
        let contract = parse(PROTO, "PetService");
        let pet = contract.types.iter().find(|t| matches!(t, ContractType::Object { name, .. } if name == "Pet"));
        match pet {
            Some(ContractType::Object { fields, .. }) => {
                assert_eq!(fields.len(), 3);
                assert_eq!(fields[2].source_line, Some(3));
            }
            _ => panic!("expected Pet message"),
        }
    }

    #[test]
    fn repeated_field_becomes_array_type() {
        let contract = parse(PROTO, "PetService");
        let pet = contract.types.iter().find_map(|t| match t {
            ContractType::Object { name, fields } if name == "Pet" => Some(fields),
            _ => None,
        }).unwrap();
        let tags = pet.iter().find(|f| f.name == "tags").unwrap();
        assert!(matches!(*tags.type_kind, ContractType::Array { .. }));
    }
}
