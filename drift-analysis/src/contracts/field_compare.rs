//! Recursive comparison of two contract field lists, producing the fixed
//! set of mismatch types and severities.

use super::types::{ContractField, ContractMismatch, ContractType, MismatchType, ScalarType};

/// Compare a provider's fields against a consumer's, recursing into nested
/// object fields. `path_prefix` is the dot-notation path of the parent.
pub fn compare_fields(
    provider: &[ContractField],
    consumer: &[ContractField],
    path_prefix: &str,
) -> Vec<ContractMismatch> {
    let mut mismatches = Vec::new();

    for p_field in provider {
        let path = dot_path(path_prefix, &p_field.name);
        match consumer.iter().find(|f| f.name == p_field.name) {
            None => mismatches.push(mismatch(
                &path,
                MismatchType::MissingInConsumer,
                format!("field '{}' present in provider but absent from consumer", p_field.name),
                Some(describe_type(&p_field.type_kind)),
                None,
            )),
            Some(c_field) => mismatches.extend(compare_field_pair(&path, p_field, c_field)),
        }
    }

    for c_field in consumer {
        if !provider.iter().any(|f| f.name == c_field.name) {
            let path = dot_path(path_prefix, &c_field.name);
            mismatches.push(mismatch(
                &path,
                MismatchType::MissingInProvider,
                format!("field '{}' present in consumer but absent from provider", c_field.name),
                None,
                Some(describe_type(&c_field.type_kind)),
            ));
        }
    }

    mismatches
}

fn compare_field_pair(
    path: &str,
    provider: &ContractField,
    consumer: &ContractField,
) -> Vec<ContractMismatch> {
    let mut out = Vec::new();

    let p_scalar = canonical_scalar(&provider.type_kind);
    let c_scalar = canonical_scalar(&consumer.type_kind);
    if let (Some(p), Some(c)) = (p_scalar, c_scalar) {
        if p != c {
            out.push(mismatch(
                path,
                MismatchType::TypeMismatch,
                format!("type mismatch: provider is {p:?}, consumer is {c:?}"),
                Some(format!("{p:?}")),
                Some(format!("{c:?}")),
            ));
        }
    }

    if provider.required != consumer.required {
        out.push(mismatch(
            path,
            MismatchType::OptionalityMismatch,
            format!(
                "required mismatch: provider required={}, consumer required={}",
                provider.required, consumer.required
            ),
            Some(provider.required.to_string()),
            Some(consumer.required.to_string()),
        ));
    }

    if provider.nullable != consumer.nullable {
        out.push(mismatch(
            path,
            MismatchType::NullabilityMismatch,
            format!(
                "nullability mismatch: provider nullable={}, consumer nullable={}",
                provider.nullable, consumer.nullable
            ),
            Some(provider.nullable.to_string()),
            Some(consumer.nullable.to_string()),
        ));
    }

    if let (ContractType::Enum { values: p_values, .. }, ContractType::Enum { values: c_values, .. }) =
        (provider.type_kind.as_ref(), consumer.type_kind.as_ref())
    {
        if p_values != c_values {
            out.push(mismatch(
                path,
                MismatchType::EnumMismatch,
                "enum value set differs between provider and consumer".to_string(),
                Some(p_values.join(",")),
                Some(c_values.join(",")),
            ));
        }
    }

    if constraints_differ(provider, consumer) {
        out.push(mismatch(
            path,
            MismatchType::ConstraintMismatch,
            "field constraints differ between provider and consumer".to_string(),
            None,
            None,
        ));
    }

    if let (ContractType::Object { fields: p_fields, .. }, ContractType::Object { fields: c_fields, .. }) =
        (provider.type_kind.as_ref(), consumer.type_kind.as_ref())
    {
        out.extend(compare_fields(p_fields, c_fields, path));
    }

    out
}

fn constraints_differ(a: &ContractField, b: &ContractField) -> bool {
    let ca = &a.constraints;
    let cb = &b.constraints;
    ca.min_length != cb.min_length
        || ca.max_length != cb.max_length
        || ca.min_value != cb.min_value
        || ca.max_value != cb.max_value
        || ca.pattern != cb.pattern
        || ca.format != cb.format
        || ca.unique != cb.unique
}

/// Maps a language-specific type to the canonical scalar set, when the type
/// is a scalar. Non-scalar kinds (Object, Array, ...) return `None` so the
/// caller does not flag a spurious type mismatch on structural types.
fn canonical_scalar(t: &ContractType) -> Option<ScalarType> {
    match t {
        ContractType::Scalar(s) => Some(*s),
        _ => None,
    }
}

fn describe_type(t: &ContractType) -> String {
    match t {
        ContractType::Object { name, .. } => format!("Object({name})"),
        ContractType::Enum { name, .. } => format!("Enum({name})"),
        ContractType::Union { name, .. } => format!("Union({name})"),
        ContractType::Array { element } => format!("Array({})", describe_type(element)),
        ContractType::Map { value, .. } => format!("Map(.., {})", describe_type(value)),
        ContractType::Scalar(s) => format!("{s:?}"),
        ContractType::Reference(name) => format!("Reference({name})"),
    }
}

fn dot_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn mismatch(
    path: &str,
    mismatch_type: MismatchType,
    description: String,
    provider_value: Option<String>,
    consumer_value: Option<String>,
) -> ContractMismatch {
    ContractMismatch {
        field_path: path.to_string(),
        mismatch_type,
        severity: mismatch_type.severity(),
        description,
        provider_value,
        consumer_value,
    }
}
