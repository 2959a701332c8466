//! Normalizes framework-specific path parameter syntaxes to a common
//! `:param` form.

use std::sync::OnceLock;

use regex::Regex;

/// A path normalized to `:param` form, with its API version segment (if any)
/// split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    pub path: String,
    pub version: Option<String>,
}

fn patterns() -> &'static (Regex, Regex, Regex, Regex, Regex, Regex) {
    static RE: OnceLock<(Regex, Regex, Regex, Regex, Regex, Regex)> = OnceLock::new();
    RE.get_or_init(|| {
        (
            // Express/Koa-style :param
            Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
            // Flask/Django/FastAPI-style {param}
            Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap(),
            // ASP.NET-style <param>
            Regex::new(r"<([A-Za-z_][A-Za-z0-9_]*)>").unwrap(),
            // Flask type-annotated <int:param>
            Regex::new(r"<[A-Za-z_][A-Za-z0-9_]*:([A-Za-z_][A-Za-z0-9_]*)>").unwrap(),
            // JS template-literal ${param}
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap(),
            // API version segment: /v1, /v2.1, /api/v3
            Regex::new(r"^/(v\d+(?:\.\d+)?)(?:/|$)").unwrap(),
        )
    })
}

/// Normalize a raw route path to the common `:param` form, splitting out any
/// leading API version segment.
pub fn normalize(raw: &str) -> NormalizedPath {
    let (colon, brace, angle, typed_angle, template, version_re) = patterns();

    let mut path = typed_angle.replace_all(raw, ":$1").to_string();
    path = angle.replace_all(&path, ":$1").to_string();
    path = brace.replace_all(&path, ":$1").to_string();
    path = template.replace_all(&path, ":$1").to_string();
    path = colon.replace_all(&path, ":$1").to_string();

    if !path.starts_with('/') {
        path = format!("/{path}");
    }
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    if path.is_empty() {
        path = "/".to_string();
    }

    let version = version_re
        .captures(&path)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    NormalizedPath { path, version }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_express_colon_param() {
        assert_eq!(normalize("/users/:id").path, "/users/:id");
    }

    #[test]
    fn normalizes_flask_curly_brace_param() {
        assert_eq!(normalize("/users/{id}").path, "/users/:id");
    }

    #[test]
    fn normalizes_aspnet_angle_bracket_param() {
        assert_eq!(normalize("/users/<id>").path, "/users/:id");
    }

    #[test]
    fn normalizes_flask_typed_angle_bracket_param() {
        assert_eq!(normalize("/users/<int:id>").path, "/users/:id");
    }

    #[test]
    fn normalizes_template_literal_param() {
        assert_eq!(normalize("/users/${id}").path, "/users/:id");
    }

    #[test]
    fn enforces_leading_slash() {
        assert_eq!(normalize("users/:id").path, "/users/:id");
    }

    #[test]
    fn removes_trailing_slash() {
        assert_eq!(normalize("/users/").path, "/users");
    }

    #[test]
    fn empty_path_becomes_root() {
        assert_eq!(normalize("").path, "/");
        assert_eq!(normalize("/").path, "/");
    }

    #[test]
    fn extracts_version_segment() {
        let result = normalize("/v2/users/:id");
        assert_eq!(result.version, Some("v2".to_string()));
        assert_eq!(result.path, "/v2/users/:id");
    }

    #[test]
    fn no_version_segment_is_none() {
        assert_eq!(normalize("/users/:id").version, None);
    }
}
