//! Extracts a `Contract` from an OpenAPI 3.0/3.1 specification document
//! (YAML or JSON).

use openapiv3::{OpenAPI, Parameter, ReferenceOr, Schema, SchemaKind, Type as OaType};

use crate::contracts::path_normalize;
use crate::contracts::types::{
    Contract, ContractField, ContractOperation, ContractStatus, ContractType, FieldConstraints,
    OperationKind, OperationParameter, ParamLocation, Paradigm, Provenance, ScalarType, SpecType,
};

/// Parse an OpenAPI document (JSON or YAML) into a `Contract`.
pub fn parse(spec_text: &str, source_version: &str) -> Result<Contract, String> {
    let spec: OpenAPI = serde_json::from_str(spec_text)
        .or_else(|_| serde_yaml::from_str(spec_text))
        .map_err(|e| format!("failed to parse OpenAPI spec: {e}"))?;

    let service_name = Some(spec.info.title.clone());
    let mut operations = Vec::new();

    for (raw_path, path_item_ref) in &spec.paths.paths {
        let ReferenceOr::Item(path_item) = path_item_ref else { continue };
        let normalized = path_normalize::normalize(raw_path);

        let methods: [(&str, &Option<openapiv3::Operation>); 5] = [
            ("GET", &path_item.get),
            ("POST", &path_item.post),
            ("PUT", &path_item.put),
            ("DELETE", &path_item.delete),
            ("PATCH", &path_item.patch),
        ];

        for (method, op) in methods {
            let Some(operation) = op else { continue };
            operations.push(extract_operation(method, &normalized.path, operation));
        }
    }

    Ok(Contract {
        id: format!("openapi:{}", spec.info.title),
        paradigm: Paradigm::Rest,
        service_name,
        operations,
        types: Vec::new(),
        provenance: Provenance::SpecFile { spec_type: SpecType::OpenApi, version: source_version.to_string() },
        status: ContractStatus::Discovered,
        confidence: 0.0,
        consumers: Vec::new(),
        mismatches: Vec::new(),
        breaking_changes: Vec::new(),
    })
}

fn extract_operation(method: &str, path: &str, operation: &openapiv3::Operation) -> ContractOperation {
    let parameters = operation
        .parameters
        .iter()
        .filter_map(|p| match p {
            ReferenceOr::Item(param) => Some(extract_parameter(param)),
            ReferenceOr::Reference { .. } => None,
        })
        .collect();

    ContractOperation {
        name: operation.operation_id.clone().unwrap_or_else(|| format!("{method} {path}")),
        kind: OperationKind::Rest { method: method.to_string(), path: path.to_string() },
        input_type: operation.request_body.as_ref().map(|_| "RequestBody".to_string()),
        output_type: operation.responses.responses.keys().next().map(|code| format!("Response{code}")),
        parameters,
        auth_required: !operation.security.is_empty(),
        deprecated: operation.deprecated,
        deprecation_note: None,
        source_file: "openapi.yaml".to_string(),
        source_line: 0,
    }
}

fn extract_parameter(param: &Parameter) -> OperationParameter {
    let data = param.parameter_data_ref();
    let location = match param {
        Parameter::Query { .. } => ParamLocation::Query,
        Parameter::Path { .. } => ParamLocation::Path,
        Parameter::Header { .. } => ParamLocation::Header,
        Parameter::Cookie { .. } => ParamLocation::Cookie,
    };
    OperationParameter {
        name: data.name.clone(),
        location,
        type_ref: "unknown".to_string(),
        required: data.required,
        default: None,
    }
}

/// Convert an OpenAPI/JSON Schema object into a `ContractType`, recursing
/// into object properties and array items.
pub fn schema_to_contract_type(name: &str, schema: &Schema) -> ContractType {
    match &schema.schema_kind {
        SchemaKind::Type(OaType::String(s)) => {
            if s.enumeration.is_empty() {
                ContractType::Scalar(ScalarType::String)
            } else {
                ContractType::Enum {
                    name: name.to_string(),
                    values: s.enumeration.iter().filter_map(|v| v.clone()).collect(),
                }
            }
        }
        SchemaKind::Type(OaType::Integer(_)) => ContractType::Scalar(ScalarType::Integer),
        SchemaKind::Type(OaType::Number(_)) => ContractType::Scalar(ScalarType::Float),
        SchemaKind::Type(OaType::Boolean(_)) => ContractType::Scalar(ScalarType::Boolean),
        SchemaKind::Type(OaType::Array(arr)) => {
            let element = arr
                .items
                .as_ref()
                .and_then(|r| match r {
                    ReferenceOr::Item(s) => Some(schema_to_contract_type("Element", s)),
                    ReferenceOr::Reference { reference } => {
                        Some(ContractType::Reference(reference_name(reference)))
                    }
                })
                .unwrap_or(ContractType::Scalar(ScalarType::Any));
            ContractType::Array { element: Box::new(element) }
        }
        SchemaKind::Type(OaType::Object(obj)) => {
            let fields = obj
                .properties
                .iter()
                .map(|(field_name, field_schema)| {
                    let field_type = match field_schema {
                        ReferenceOr::Item(s) => schema_to_contract_type(field_name, s),
                        ReferenceOr::Reference { reference } => {
                            ContractType::Reference(reference_name(reference))
                        }
                    };
                    ContractField {
                        name: field_name.clone(),
                        type_kind: Box::new(field_type),
                        required: obj.required.contains(field_name),
                        nullable: schema.schema_data.nullable,
                        default: None,
                        description: field_schema
                            .as_item()
                            .and_then(|s| s.schema_data.description.clone()),
                        deprecated: field_schema.as_item().is_some_and(|s| s.schema_data.deprecated),
                        constraints: FieldConstraints::default(),
                        source_line: None,
                    }
                })
                .collect();
            ContractType::Object { name: name.to_string(), fields }
        }
        _ => ContractType::Scalar(ScalarType::Any),
    }
}

fn reference_name(reference: &str) -> String {
    reference.rsplit('/').next().unwrap_or(reference).to_string()
}
