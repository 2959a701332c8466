//! Code-first REST route extractors.
//!
//! Implements a representative cross-section of the framework surface
//! rather than an exhaustive catalog of every REST framework and consumer
//! library in existence — frameworks are added here the same way
//! `frameworks::packs` grows its TOML packs, one pattern table entry at a
//! time, grounded in a regex-per-line scan over raw source text.

use std::sync::OnceLock;

use regex::Regex;

use crate::contracts::types::ExtractedOperation;

struct RouteRule {
    framework: &'static str,
    pattern: fn() -> &'static Regex,
    method_group: Option<usize>,
    path_group: usize,
    fixed_method: Option<&'static str>,
}

fn express_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\brouter\.(get|post|put|delete|patch)\s*\(\s*['"]([^'"]+)['"]"#).unwrap()
    })
}

fn flask_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"@app\.route\s*\(\s*['"]([^'"]+)['"](?:.*methods\s*=\s*\[\s*['"](\w+)['"])?"#).unwrap()
    })
}

fn fastapi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)@(?:app|router)\.(get|post|put|delete|patch)\s*\(\s*['"]([^'"]+)['"]"#).unwrap()
    })
}

fn spring_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"@(GetMapping|PostMapping|PutMapping|DeleteMapping|PatchMapping)\s*\(\s*"([^"]+)""#).unwrap()
    })
}

fn aspnet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\[Http(Get|Post|Put|Delete|Patch)\s*\(\s*"([^"]*)"\s*\)\]"#).unwrap())
}

fn rails_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b(get|post|put|delete|patch)\s+['"]([^'"]+)['"]\s*,\s*to:"#).unwrap()
    })
}

fn actix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"#\[(get|post|put|delete|patch)\s*\(\s*"([^"]+)"\s*\)\]"#).unwrap()
    })
}

fn gin_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\brouter\.(GET|POST|PUT|DELETE|PATCH)\s*\(\s*"([^"]+)""#).unwrap()
    })
}

fn rules() -> &'static [RouteRule] {
    static RULES: OnceLock<Vec<RouteRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            RouteRule { framework: "express", pattern: express_re, method_group: Some(1), path_group: 2, fixed_method: None },
            RouteRule { framework: "flask", pattern: flask_re, method_group: Some(2), path_group: 1, fixed_method: Some("GET") },
            RouteRule { framework: "fastapi", pattern: fastapi_re, method_group: Some(1), path_group: 2, fixed_method: None },
            RouteRule { framework: "spring", pattern: spring_re, method_group: None, path_group: 2, fixed_method: None },
            RouteRule { framework: "aspnet", pattern: aspnet_re, method_group: Some(1), path_group: 2, fixed_method: None },
            RouteRule { framework: "rails", pattern: rails_re, method_group: Some(1), path_group: 2, fixed_method: None },
            RouteRule { framework: "actix", pattern: actix_re, method_group: Some(1), path_group: 2, fixed_method: None },
            RouteRule { framework: "gin", pattern: gin_re, method_group: Some(1), path_group: 2, fixed_method: None },
        ]
    })
}

fn spring_method(mapping: &str) -> &'static str {
    match mapping {
        "GetMapping" => "GET",
        "PostMapping" => "POST",
        "PutMapping" => "PUT",
        "DeleteMapping" => "DELETE",
        "PatchMapping" => "PATCH",
        _ => "GET",
    }
}

/// Scan a source file's contents for route declarations across the known
/// framework pattern table, returning one `ExtractedOperation` per match.
pub fn extract(file_path: &str, content: &str) -> Vec<ExtractedOperation> {
    let mut found = Vec::new();

    for rule in rules() {
        let re = (rule.pattern)();
        for (line_idx, line) in content.lines().enumerate() {
            let Some(caps) = re.captures(line) else { continue };

            let method = if rule.framework == "spring" {
                spring_method(&caps[1]).to_string()
            } else if let Some(group) = rule.method_group {
                caps.get(group).map(|m| m.as_str().to_uppercase()).unwrap_or_else(|| {
                    rule.fixed_method.unwrap_or("GET").to_string()
                })
            } else {
                rule.fixed_method.unwrap_or("GET").to_string()
            };

            let Some(raw_path) = caps.get(rule.path_group) else { continue };

            found.push(ExtractedOperation {
                raw_path: raw_path.as_str().to_string(),
                method,
                framework: rule.framework.to_string(),
                file: file_path.to_string(),
                line: line_idx as u32 + 1,
                parameters: Vec::new(),
                input_type: None,
                output_type: None,
            });
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_express_route() {
        let src = "router.get('/pets/:id', getPet);";
        let ops = extract("routes.js", src);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].framework, "express");
        assert_eq!(ops[0].method, "GET");
        assert_eq!(ops[0].raw_path, "/pets/:id");
    }

    #[test]
    fn extracts_flask_route_with_explicit_methods() {
        let src = r#"@app.route('/pets/<id>', methods=['POST'])"#;
        let ops = extract("app.py", src);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].method, "POST");
    }

    #[test]
    fn extracts_spring_mapping() {
        let src = r#"@PostMapping("/api/pets")"#;
        let ops = extract("PetController.java", src);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].method, "POST");
        assert_eq!(ops[0].raw_path, "/api/pets");
    }

    #[test]
    fn extracts_actix_attribute_route() {
        let src = r#"#[get("/pets/{id}")]"#;
        let ops = extract("handlers.rs", src);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].framework, "actix");
    }

    #[test]
    fn no_match_returns_empty() {
        let ops = extract("plain.txt", "just some text");
        assert!(ops.is_empty());
    }
}
