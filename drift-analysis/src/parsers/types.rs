//! The parse result shape every detector, resolver, and call-graph builder
//! reads from. One `ParseResult` per file, produced by a `LanguageParser` and
//! cached by content hash in `ParseCache`.

use serde::{Deserialize, Serialize};

use crate::scanner::language_detect::Language;

/// A source position (0-indexed column, 1-indexed line to match tree-sitter's
/// `Point` convention used by our parsers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// A source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A decorator/annotation attached to a function, method, or class
/// (`@Injectable`, `[Authorize]`, `#[derive(...)]`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratorInfo {
    pub name: String,
    pub range: Range,
    pub arguments: Vec<String>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default_value: Option<String>,
}

/// A top-level or nested function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    pub qualified_name: Option<String>,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub is_exported: bool,
    pub is_async: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub decorators: Vec<DecoratorInfo>,
    /// Hash of the parameter/return-type signature, used for call-graph node
    /// identity across incremental re-parses.
    pub signature_hash: u64,
    /// Hash of the function body, used to detect behavior-preserving renames.
    pub body_hash: u64,
}

/// A method on a class, identical in shape to `FunctionInfo` plus nothing
/// class-specific — kept as its own type so callers can't conflate the two.
pub type MethodInfo = FunctionInfo;

/// A class/interface/struct declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub is_exported: bool,
    pub range: Range,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub methods: Vec<MethodInfo>,
    pub decorators: Vec<DecoratorInfo>,
}

/// A single named import binding (`import { Foo as Bar } from "./foo"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub name: String,
    pub alias: Option<String>,
}

/// An import statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportInfo {
    pub source: String,
    pub line: u32,
    pub specifiers: Vec<ImportSpecifier>,
}

/// An export statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub name: Option<String>,
    pub line: u32,
}

/// A function/method call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSite {
    pub line: u32,
    pub column: u32,
    pub callee_name: String,
    /// The receiver expression for method calls (`foo` in `foo.bar()`).
    pub receiver: Option<String>,
}

/// A string literal, extracted for secret detection, SQL sniffing, and
/// framework pattern matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub value: String,
    pub line: u32,
    pub column: u32,
}

/// How a catch/except/rescue clause handles its exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorHandlingKind {
    /// Catches a specific, named exception/error type.
    Specific,
    /// Catches a broad base type (`Exception`, `Error`, `Throwable`, ...).
    Generic,
    /// Catch body has no statements — the exception is silently dropped.
    Empty,
}

/// One catch/except/rescue clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlingInfo {
    pub kind: ErrorHandlingKind,
    pub line: u32,
}

/// A comment recognized as documentation (`///`, `/**`, `##`, ...) rather
/// than an inline remark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocComment {
    pub text: String,
    pub line: u32,
}

/// The full per-file parse result: every structural fact a detector,
/// resolver, or call-graph builder needs, extracted once per parse and
/// cached by content hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub file: String,
    pub language: Language,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<ExportInfo>,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub call_sites: Vec<CallSite>,
    pub string_literals: Vec<StringLiteral>,
    pub error_handling: Vec<ErrorHandlingInfo>,
    pub doc_comments: Vec<DocComment>,
    /// Total source line count, used for per-file stats.
    pub line_count: u32,
}

impl ParseResult {
    /// An empty result for a given file/language, filled in by parsers as
    /// they walk the tree.
    pub fn new(file: impl Into<String>, language: Language) -> Self {
        Self {
            file: file.into(),
            language,
            imports: Vec::new(),
            exports: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
            call_sites: Vec::new(),
            string_literals: Vec::new(),
            error_handling: Vec::new(),
            doc_comments: Vec::new(),
            line_count: 0,
        }
    }
}
