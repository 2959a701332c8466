//! Context-aware severity adjustment: elevate near auth/password code,
//! reduce in test/vendor/generated files or next to a todo/fixme.

use super::types::Severity;

const PASSWORD_AUTH_INDICATORS: &[&str] = &[
    "password", "passwd", "pwd", "auth", "credential", "secret", "token", "login", "session",
];

const TEST_PATH_INDICATORS: &[&str] = &["/test", "/tests", "/spec", "_test.", "_spec.", ".test.", ".spec."];
const VENDOR_PATH_INDICATORS: &[&str] = &["/vendor/", "/node_modules/", "/third_party/", "/.venv/"];
const GENERATED_PATH_INDICATORS: &[&str] = &["/generated/", "/gen/", ".generated.", ".pb.go", ".pb.py"];

/// Surrounding context used to adjust a finding's base severity.
pub struct SeverityContext<'a> {
    pub file_path: &'a str,
    pub matched_line: &'a str,
    pub adjacent_comment: Option<&'a str>,
}

pub fn adjust(base: Severity, ctx: &SeverityContext) -> Severity {
    let path_lower = ctx.file_path.to_lowercase();
    let line_lower = ctx.matched_line.to_lowercase();

    if TEST_PATH_INDICATORS.iter().any(|p| path_lower.contains(p))
        || VENDOR_PATH_INDICATORS.iter().any(|p| path_lower.contains(p))
        || GENERATED_PATH_INDICATORS.iter().any(|p| path_lower.contains(p))
    {
        return downgrade(base);
    }

    if let Some(comment) = ctx.adjacent_comment {
        let lower = comment.to_lowercase();
        if lower.contains("todo") || lower.contains("fixme") {
            return downgrade(base);
        }
    }

    if PASSWORD_AUTH_INDICATORS.iter().any(|p| path_lower.contains(p) || line_lower.contains(p)) {
        return elevate(base);
    }

    base
}

fn elevate(severity: Severity) -> Severity {
    match severity {
        Severity::Info => Severity::Low,
        Severity::Low => Severity::Medium,
        Severity::Medium => Severity::High,
        Severity::High => Severity::Critical,
        Severity::Critical => Severity::Critical,
    }
}

fn downgrade(severity: Severity) -> Severity {
    match severity {
        Severity::Critical => Severity::High,
        Severity::High => Severity::Medium,
        Severity::Medium => Severity::Low,
        Severity::Low => Severity::Info,
        Severity::Info => Severity::Info,
    }
}
