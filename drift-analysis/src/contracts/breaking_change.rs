//! Compares successive scans of the same contract and classifies the
//! differences into breaking-change records with paradigm-specific rules.

use super::types::{
    BreakingChange, BreakingChangeType, BreakingSeverity, Contract, ContractOperation,
    OperationKind, Paradigm,
};

fn operation_key(op: &ContractOperation) -> String {
    match &op.kind {
        OperationKind::Rest { method, path } => format!("{method} {path}"),
        OperationKind::GraphQL { operation_name, .. } => operation_name.clone(),
        OperationKind::Grpc { service, method } => format!("{service}.{method}"),
        OperationKind::EventDriven { channel, event } => format!("{channel}/{event}"),
        OperationKind::WebSocket { channel } => channel.clone(),
        OperationKind::TypedProcedure { procedure } => procedure.clone(),
    }
}

/// Classify changes between a contract's previous and current scan.
pub fn classify(before: &Contract, after: &Contract) -> Vec<BreakingChange> {
    let mut changes = Vec::new();
    let paradigm = after.paradigm;

    for prev_op in &before.operations {
        let key = operation_key(prev_op);
        match after.operations.iter().find(|op| operation_key(op) == key) {
            None => changes.push(removed_operation(paradigm, &key)),
            Some(curr_op) => changes.extend(compare_operation(paradigm, &key, prev_op, curr_op)),
        }
    }

    for curr_op in &after.operations {
        let key = operation_key(curr_op);
        if !before.operations.iter().any(|op| operation_key(op) == key) {
            changes.push(added_operation(paradigm, &key));
        }
    }

    changes
}

fn removed_operation(paradigm: Paradigm, name: &str) -> BreakingChange {
    BreakingChange {
        change_type: BreakingChangeType::OperationRemoved,
        severity: BreakingSeverity::Breaking,
        paradigm,
        operation: name.to_string(),
        field_path: None,
        description: format!("operation '{name}' was removed"),
        before: Some(name.to_string()),
        after: None,
        migration_hint: Some("consumers calling this operation will fail; provide a replacement or deprecation window".to_string()),
    }
}

fn added_operation(paradigm: Paradigm, name: &str) -> BreakingChange {
    BreakingChange {
        change_type: BreakingChangeType::OperationAdded,
        severity: BreakingSeverity::NonBreaking,
        paradigm,
        operation: name.to_string(),
        field_path: None,
        description: format!("operation '{name}' was added"),
        before: None,
        after: Some(name.to_string()),
        migration_hint: None,
    }
}

fn compare_operation(
    paradigm: Paradigm,
    name: &str,
    before: &ContractOperation,
    after: &ContractOperation,
) -> Vec<BreakingChange> {
    let mut changes = Vec::new();

    for before_param in &before.parameters {
        match after.parameters.iter().find(|p| p.name == before_param.name) {
            None => changes.push(BreakingChange {
                change_type: BreakingChangeType::FieldRemoved,
                severity: BreakingSeverity::Breaking,
                paradigm,
                operation: name.to_string(),
                field_path: Some(before_param.name.clone()),
                description: format!("parameter '{}' was removed from '{name}'", before_param.name),
                before: Some(before_param.name.clone()),
                after: None,
                migration_hint: None,
            }),
            Some(after_param) => {
                if !before_param.required && after_param.required {
                    let severity = match paradigm {
                        Paradigm::Rest => BreakingSeverity::Breaking,
                        Paradigm::GraphQL => BreakingSeverity::Breaking,
                        _ => BreakingSeverity::Conditional,
                    };
                    changes.push(BreakingChange {
                        change_type: match paradigm {
                            Paradigm::GraphQL => BreakingChangeType::GraphQLArgumentAdded,
                            _ => BreakingChangeType::FieldRequirednessChanged,
                        },
                        severity,
                        paradigm,
                        operation: name.to_string(),
                        field_path: Some(before_param.name.clone()),
                        description: format!(
                            "parameter '{}' became required on '{name}'",
                            before_param.name
                        ),
                        before: Some("optional".to_string()),
                        after: Some("required".to_string()),
                        migration_hint: Some("existing callers not supplying this parameter will now fail".to_string()),
                    });
                }
            }
        }
    }

    for after_param in &after.parameters {
        if !before.parameters.iter().any(|p| p.name == after_param.name) {
            let severity = if after_param.required {
                BreakingSeverity::Breaking
            } else {
                BreakingSeverity::NonBreaking
            };
            changes.push(BreakingChange {
                change_type: if after_param.required {
                    BreakingChangeType::RequiredFieldAdded
                } else {
                    BreakingChangeType::OptionalFieldAdded
                },
                severity,
                paradigm,
                operation: name.to_string(),
                field_path: Some(after_param.name.clone()),
                description: format!("parameter '{}' was added to '{name}'", after_param.name),
                before: None,
                after: Some(after_param.name.clone()),
                migration_hint: None,
            });
        }
    }

    if before.deprecated != after.deprecated && after.deprecated {
        changes.push(BreakingChange {
            change_type: BreakingChangeType::OperationRenamed,
            severity: BreakingSeverity::Deprecation,
            paradigm,
            operation: name.to_string(),
            field_path: None,
            description: format!("operation '{name}' was marked deprecated"),
            before: Some("active".to_string()),
            after: Some("deprecated".to_string()),
            migration_hint: after.deprecation_note.clone(),
        });
    }

    changes
}
