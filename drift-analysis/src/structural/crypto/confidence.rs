//! Four-factor weighted confidence for a crypto finding.

/// Inputs to the confidence calculation, one per weighted factor.
pub struct ConfidenceInputs {
    /// The pattern's own base confidence, in [0, 1].
    pub base_pattern_confidence: f32,
    /// The library the matched function belongs to is imported in the file.
    pub import_confirmed: bool,
    /// The pattern's argument-check rule (if any) ran and passed.
    pub argument_validated: bool,
    /// A password/auth/security indicator was found nearby.
    pub security_context_detected: bool,
}

const BASE_WEIGHT: f32 = 0.35;
const IMPORT_WEIGHT: f32 = 0.25;
const ARG_WEIGHT: f32 = 0.25;
const CONTEXT_WEIGHT: f32 = 0.15;

pub fn compute(inputs: &ConfidenceInputs) -> f32 {
    let mut score = inputs.base_pattern_confidence.clamp(0.0, 1.0) * BASE_WEIGHT;
    if inputs.import_confirmed {
        score += IMPORT_WEIGHT;
    }
    if inputs.argument_validated {
        score += ARG_WEIGHT;
    }
    if inputs.security_context_detected {
        score += CONTEXT_WEIGHT;
    }
    score.clamp(0.1, 0.99)
}
