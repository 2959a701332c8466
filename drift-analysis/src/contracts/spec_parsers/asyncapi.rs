//! AsyncAPI extractor. AsyncAPI's channel/operation/message shape is
//! structurally close enough to OpenAPI's that plain `serde` struct
//! deserialization is sufficient; no dedicated crate exists in the pack and
//! none is needed.

use serde::Deserialize;

use crate::contracts::types::{
    Contract, ContractOperation, ContractStatus, OperationKind, Paradigm, Provenance, SpecType,
};

#[derive(Debug, Deserialize)]
struct AsyncApiDoc {
    info: AsyncApiInfo,
    channels: std::collections::BTreeMap<String, Channel>,
}

#[derive(Debug, Deserialize)]
struct AsyncApiInfo {
    title: String,
    version: String,
}

#[derive(Debug, Deserialize, Default)]
struct Channel {
    #[serde(default)]
    publish: Option<Operation>,
    #[serde(default)]
    subscribe: Option<Operation>,
}

#[derive(Debug, Deserialize, Default)]
struct Operation {
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    #[serde(default)]
    deprecated: bool,
}

/// Parse an AsyncAPI document (JSON or YAML) into a `Contract`, emitting one
/// `EventDriven` operation per publish/subscribe side of each channel.
pub fn parse(spec_text: &str) -> Result<Contract, String> {
    let doc: AsyncApiDoc = serde_json::from_str(spec_text)
        .or_else(|_| serde_yaml::from_str(spec_text))
        .map_err(|e| format!("failed to parse AsyncAPI spec: {e}"))?;

    let mut operations = Vec::new();
    for (channel_name, channel) in &doc.channels {
        if let Some(op) = &channel.publish {
            operations.push(event_operation(channel_name, "publish", op));
        }
        if let Some(op) = &channel.subscribe {
            operations.push(event_operation(channel_name, "subscribe", op));
        }
    }

    Ok(Contract {
        id: format!("asyncapi:{}", doc.info.title),
        paradigm: Paradigm::EventDriven,
        service_name: Some(doc.info.title),
        operations,
        types: Vec::new(),
        provenance: Provenance::SpecFile { spec_type: SpecType::AsyncApi, version: doc.info.version },
        status: ContractStatus::Discovered,
        confidence: 0.0,
        consumers: Vec::new(),
        mismatches: Vec::new(),
        breaking_changes: Vec::new(),
    })
}

fn event_operation(channel: &str, event: &str, op: &Operation) -> ContractOperation {
    ContractOperation {
        name: op.operation_id.clone().unwrap_or_else(|| format!("{channel}.{event}")),
        kind: OperationKind::EventDriven { channel: channel.to_string(), event: event.to_string() },
        input_type: None,
        output_type: None,
        parameters: Vec::new(),
        auth_required: false,
        deprecated: op.deprecated,
        deprecation_note: None,
        source_file: "asyncapi.yaml".to_string(),
        source_line: 0,
    }
}
