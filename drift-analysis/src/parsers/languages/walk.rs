//! One tree-sitter walker shared by every `LanguageParser`, configured per
//! grammar by a `LanguageSpec`.

use regex::Regex;
use std::sync::OnceLock;
use tree_sitter::Node;

use crate::scanner::hasher::hash_content;
use crate::scanner::language_detect::Language;

use super::spec::LanguageSpec;
use crate::parsers::types::{
    CallSite, ClassInfo, DecoratorInfo, DocComment, ErrorHandlingInfo, ErrorHandlingKind,
    ExportInfo, FunctionInfo, ImportInfo, ImportSpecifier, Parameter, ParseResult, Position,
    Range, StringLiteral,
};

const GENERIC_EXCEPTION_NAMES: &[&str] =
    &["Exception", "Error", "Throwable", "StandardError", "BaseException"];
const DOC_COMMENT_PREFIXES: &[&str] = &["///", "/**", "##"];

/// Walk `tree` once, extracting the structural facts `spec` names.
pub fn extract(tree: &tree_sitter::Tree, source: &[u8], file: &str, language: Language, spec: &LanguageSpec) -> ParseResult {
    let mut result = ParseResult::new(file, language);
    result.line_count = source.iter().filter(|&&b| b == b'\n').count() as u32 + 1;

    let root = tree.root_node();
    walk_node(&root, source, spec, &mut result, None);
    result
}

fn walk_node(
    node: &Node,
    source: &[u8],
    spec: &LanguageSpec,
    result: &mut ParseResult,
    current_class: Option<usize>,
) {
    let kind = node.kind();

    if spec.class_kinds.contains(&kind) {
        let class_idx = result.classes.len();
        let class = build_class(node, source, spec);
        result.classes.push(class);

        if let Some(body) = class_body(node, spec) {
            let mut c = body.walk();
            for child in body.children(&mut c) {
                walk_node(&child, source, spec, result, Some(class_idx));
            }
        }
        return;
    }

    if spec.function_kinds.contains(&kind) {
        let func = build_function(node, source, spec);
        match current_class {
            Some(idx) => result.classes[idx].methods.push(func),
            None => result.functions.push(func),
        }
        // Functions can still contain nested calls/strings/closures; keep walking.
    }

    if spec.import_kinds.contains(&kind) {
        if let Some(import) = build_import(node, source, spec) {
            result.imports.push(import);
        }
    }

    if spec.call_kinds.contains(&kind) {
        if let Some(call) = build_call(node, source) {
            result.call_sites.push(call);
        }
    }

    if spec.string_kinds.contains(&kind) {
        result.string_literals.push(build_string(node, source));
    }

    if node.kind() == "export_statement" {
        mark_following_export(node, source, result);
    }

    if !spec.catch_kinds.is_empty() && spec.catch_kinds.contains(&kind) {
        result.error_handling.push(build_error_handling(node, source));
    }

    if spec.comment_kinds.contains(&kind) {
        if let Some(doc) = build_doc_comment(node, source) {
            result.doc_comments.push(doc);
        }
    }

    let mut c = node.walk();
    for child in node.children(&mut c) {
        walk_node(&child, source, spec, result, current_class);
    }
}

fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn line_of(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn column_of(node: &Node) -> u32 {
    node.start_position().column as u32
}

fn range_of(node: &Node) -> Range {
    Range {
        start: Position { line: node.start_position().row as u32 + 1, column: node.start_position().column as u32 },
        end: Position { line: node.end_position().row as u32 + 1, column: node.end_position().column as u32 },
    }
}

/// Resolve a node's name: its `name` field if the grammar declares one,
/// otherwise the first child matching one of `spec.identifier_kinds`.
fn extract_name(node: &Node, source: &[u8], spec: &LanguageSpec) -> Option<String> {
    if let Some(name_node) = node.child_by_field_name("name") {
        return Some(node_text(&name_node, source).to_string());
    }
    let mut c = node.walk();
    for child in node.children(&mut c) {
        if spec.identifier_kinds.contains(&child.kind()) {
            return Some(node_text(&child, source).to_string());
        }
    }
    None
}

fn is_exported(node: &Node, spec: &LanguageSpec) -> bool {
    if spec.export_by_default {
        return true;
    }
    // JS/TS: wrapped in (or immediately preceded by) an export_statement.
    if let Some(parent) = node.parent() {
        if parent.kind() == "export_statement" || parent.kind() == "export_clause" {
            return true;
        }
    }
    // Java/C#/Kotlin: a `public` modifier among the node's children.
    let mut c = node.walk();
    for child in node.children(&mut c) {
        if child.kind() == "modifiers" {
            let mut mc = child.walk();
            for m in child.children(&mut mc) {
                if m.kind() == "public" {
                    return true;
                }
            }
        }
    }
    false
}

fn collect_decorators(node: &Node, source: &[u8], spec: &LanguageSpec) -> Vec<DecoratorInfo> {
    if spec.decorator_kinds.is_empty() {
        return Vec::new();
    }
    let mut decorators = Vec::new();

    // Preceding siblings (Python/JS/TS decorator-as-sibling pattern).
    let mut sib = node.prev_sibling();
    while let Some(s) = sib {
        if spec.decorator_kinds.contains(&s.kind()) {
            decorators.push(make_decorator(&s, source, spec));
            sib = s.prev_sibling();
        } else {
            break;
        }
    }
    decorators.reverse();

    // Children and grandchildren (Java annotations via `modifiers`, C#
    // `attribute_lists`).
    let mut c = node.walk();
    for child in node.children(&mut c) {
        if spec.decorator_kinds.contains(&child.kind()) {
            decorators.push(make_decorator(&child, source, spec));
            continue;
        }
        let mut gc = child.walk();
        for grandchild in child.children(&mut gc) {
            if spec.decorator_kinds.contains(&grandchild.kind()) {
                decorators.push(make_decorator(&grandchild, source, spec));
            }
        }
    }

    decorators
}

fn make_decorator(node: &Node, source: &[u8], spec: &LanguageSpec) -> DecoratorInfo {
    let name = extract_name(node, source, spec).unwrap_or_else(|| {
        node_text(node, source)
            .trim_start_matches(['@', '#', '[', '('])
            .trim_end_matches([']', ')'])
            .to_string()
    });
    DecoratorInfo { name, range: range_of(node), arguments: Vec::new() }
}

fn class_body<'a>(node: &Node<'a>, _spec: &LanguageSpec) -> Option<Node<'a>> {
    node.child_by_field_name("body")
}

fn heritage_regex() -> &'static (Regex, Regex, Regex) {
    static RE: OnceLock<(Regex, Regex, Regex)> = OnceLock::new();
    RE.get_or_init(|| {
        (
            Regex::new(r"\bextends\s+([A-Za-z_][A-Za-z0-9_.]*)").unwrap(),
            Regex::new(r"\bimplements\s+([A-Za-z_][A-Za-z0-9_.,\s]*)").unwrap(),
            Regex::new(r":\s*([A-Za-z_][A-Za-z0-9_.,\s<>]*)\{?\s*$").unwrap(),
        )
    })
}

/// Best-effort extends/implements extraction from the class header text
/// (from the class node's start to its body's start), covering both
/// keyword-based (`extends`/`implements`) and colon-based (C#/Kotlin)
/// inheritance syntax.
fn parse_heritage(node: &Node, source: &[u8], spec: &LanguageSpec) -> (Option<String>, Vec<String>) {
    let header_end = class_body(node, spec).map(|b| b.start_byte()).unwrap_or(node.end_byte());
    let header = &source[node.start_byte()..header_end.min(source.len())];
    let header = String::from_utf8_lossy(header);

    let (extends_re, implements_re, colon_re) = heritage_regex();

    if let Some(caps) = extends_re.captures(&header) {
        let extends = caps.get(1).map(|m| m.as_str().to_string());
        let implements = implements_re
            .captures(&header)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();
        return (extends, implements);
    }
    if let Some(caps) = implements_re.captures(&header) {
        let implements = caps.get(1).map(|m| m.as_str().split(',').map(|s| s.trim().to_string()).collect()).unwrap_or_default();
        return (None, implements);
    }
    if let Some(caps) = colon_re.captures(&header) {
        let mut names: Vec<String> = caps
            .get(1)
            .map(|m| m.as_str().split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        if names.is_empty() {
            return (None, Vec::new());
        }
        let extends = Some(names.remove(0));
        return (extends, names);
    }
    (None, Vec::new())
}

fn build_class(node: &Node, source: &[u8], spec: &LanguageSpec) -> ClassInfo {
    let name = extract_name(node, source, spec).unwrap_or_else(|| "<anonymous>".to_string());
    let (extends, implements) = parse_heritage(node, source, spec);
    ClassInfo {
        name,
        is_exported: is_exported(node, spec),
        range: range_of(node),
        extends,
        implements,
        methods: Vec::new(),
        decorators: collect_decorators(node, source, spec),
    }
}

fn build_function(node: &Node, source: &[u8], spec: &LanguageSpec) -> FunctionInfo {
    let name = extract_name(node, source, spec).unwrap_or_else(|| "<anonymous>".to_string());
    let body = node.child_by_field_name("body");
    let header_bytes = &source[node.start_byte()..body.map(|b| b.start_byte()).unwrap_or(node.end_byte())];
    let whole_bytes = &source[node.start_byte()..node.end_byte()];

    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| extract_parameters(&params, source))
        .unwrap_or_default();

    FunctionInfo {
        name,
        qualified_name: None,
        line: line_of(node),
        column: column_of(node),
        end_line: node.end_position().row as u32 + 1,
        is_exported: is_exported(node, spec),
        is_async: node_text(node, source).trim_start().starts_with("async"),
        parameters,
        return_type: node.child_by_field_name("return_type").map(|rt| node_text(&rt, source).to_string()),
        decorators: collect_decorators(node, source, spec),
        signature_hash: hash_content(header_bytes),
        body_hash: hash_content(whole_bytes),
    }
}

fn extract_parameters(params: &Node, source: &[u8]) -> Vec<Parameter> {
    let mut out = Vec::new();
    let mut c = params.walk();
    for child in params.children(&mut c) {
        let kind = child.kind();
        if kind == "identifier" || kind.ends_with("_parameter") || kind == "parameter" {
            let name = child
                .child_by_field_name("name")
                .or_else(|| child.child_by_field_name("pattern"))
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_else(|| node_text(&child, source).to_string());
            let type_annotation = child.child_by_field_name("type").map(|t| node_text(&t, source).to_string());
            out.push(Parameter { name, type_annotation, default_value: None });
        }
    }
    out
}

fn build_import(node: &Node, source: &[u8], spec: &LanguageSpec) -> Option<ImportInfo> {
    // Ruby/PHP-style: `require`/`use` calls masquerading as ordinary call nodes.
    if node.kind() == "call" {
        let text = node_text(node, source);
        if !(text.starts_with("require") || text.starts_with("require_relative") || text.starts_with("load")) {
            return None;
        }
    }

    let source_text = find_string_descendant(node, source).unwrap_or_else(|| node_text(node, source).to_string());
    let specifiers = collect_import_specifiers(node, source, spec);

    Some(ImportInfo {
        source: strip_quotes(&source_text),
        line: line_of(node),
        specifiers,
    })
}

fn find_string_descendant(node: &Node, source: &[u8]) -> Option<String> {
    if node.kind().contains("string") {
        return Some(node_text(node, source).to_string());
    }
    let mut c = node.walk();
    for child in node.children(&mut c) {
        if let Some(found) = find_string_descendant(&child, source) {
            return Some(found);
        }
    }
    None
}

fn collect_import_specifiers(node: &Node, source: &[u8], spec: &LanguageSpec) -> Vec<ImportSpecifier> {
    let mut specifiers = Vec::new();
    let mut c = node.walk();
    for child in node.children(&mut c) {
        if child.kind() == "import_specifier" {
            let name = child
                .child_by_field_name("name")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_else(|| node_text(&child, source).to_string());
            let alias = child.child_by_field_name("alias").map(|a| node_text(&a, source).to_string());
            specifiers.push(ImportSpecifier { name, alias });
        } else if spec.identifier_kinds.contains(&child.kind()) {
            specifiers.push(ImportSpecifier { name: node_text(&child, source).to_string(), alias: None });
        }
    }
    specifiers
}

fn build_call(node: &Node, source: &[u8]) -> Option<CallSite> {
    let callee_node = node
        .child_by_field_name("function")
        .or_else(|| node.child_by_field_name("name"))?;

    let callee_text = node_text(&callee_node, source);
    let (receiver, callee_name) = split_callee(callee_text);

    Some(CallSite {
        line: line_of(node),
        column: column_of(node),
        callee_name,
        receiver,
    })
}

/// Split a callee expression's source text into (receiver, method) on the
/// last `.`/`::`/`->` separator, or (None, whole) if there isn't one.
fn split_callee(text: &str) -> (Option<String>, String) {
    for sep in ["::", "->", "."] {
        if let Some(idx) = text.rfind(sep) {
            let (recv, method) = text.split_at(idx);
            let method = &method[sep.len()..];
            if !method.is_empty() {
                return (Some(recv.to_string()), method.to_string());
            }
        }
    }
    (None, text.to_string())
}

fn build_string(node: &Node, source: &[u8]) -> StringLiteral {
    StringLiteral {
        value: strip_quotes(node_text(node, source)),
        line: line_of(node),
        column: column_of(node),
    }
}

/// Classify a catch/except/rescue clause: empty body (swallowed), a generic
/// base-exception type, or a specific named type.
fn build_error_handling(node: &Node, source: &[u8]) -> ErrorHandlingInfo {
    let body = node.child_by_field_name("body");
    let is_empty_body = body.map(|b| b.named_child_count() == 0).unwrap_or(false);

    let header_end = body.map(|b| b.start_byte()).unwrap_or(node.end_byte());
    let header = node_text_range(node.start_byte(), header_end, source);

    let kind = if is_empty_body {
        ErrorHandlingKind::Empty
    } else if GENERIC_EXCEPTION_NAMES.iter().any(|g| header.contains(g)) {
        ErrorHandlingKind::Generic
    } else {
        ErrorHandlingKind::Specific
    };

    ErrorHandlingInfo { kind, line: line_of(node) }
}

fn node_text_range<'a>(start: usize, end: usize, source: &'a [u8]) -> std::borrow::Cow<'a, str> {
    String::from_utf8_lossy(&source[start..end.min(source.len()).max(start)])
}

/// A comment counts as documentation if it uses a doc-comment marker
/// (`///`, `/**`, `##`); ordinary `//`/`#`/`/* */` remarks are not recorded.
fn build_doc_comment(node: &Node, source: &[u8]) -> Option<DocComment> {
    let text = node_text(node, source);
    if DOC_COMMENT_PREFIXES.iter().any(|p| text.starts_with(p)) {
        Some(DocComment { text: text.to_string(), line: line_of(node) })
    } else {
        None
    }
}

fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    let s = s.strip_prefix('\'').unwrap_or(s);
    let s = s.strip_suffix('\'').unwrap_or(s);
    let s = s.strip_prefix('`').unwrap_or(s);
    let s = s.strip_suffix('`').unwrap_or(s);
    s.to_string()
}

/// Record an export statement. `export function foo() {}` is also caught by
/// `is_exported` on the wrapped declaration; this additionally records a
/// standalone `export { a, b }` clause, which names re-exports with no
/// declaration node of their own.
fn mark_following_export(node: &Node, source: &[u8], result: &mut ParseResult) {
    if node.child_by_field_name("declaration").is_some() {
        return;
    }
    let text = node_text(node, source);
    for name in text
        .trim_start_matches("export")
        .trim()
        .trim_start_matches('{')
        .trim_end_matches(';')
        .trim_end_matches('}')
        .split(',')
    {
        let name = name.trim();
        if !name.is_empty() {
            result.exports.push(ExportInfo { name: Some(name.to_string()), line: line_of(node) });
        }
    }
}
