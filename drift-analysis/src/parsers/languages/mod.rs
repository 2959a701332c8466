//! Per-language tree-sitter parsers. Each wraps a grammar-configured
//! `tree_sitter::Parser` behind `LanguageParser`; all share the extraction
//! walker in `walk.rs`, configured per grammar by `spec.rs`.

pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust_lang;
pub mod shared;
pub mod spec;
pub mod typescript;
mod walk;

use std::path::Path;

use drift_core::errors::ParseError;

use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

fn spec_for_language(lang: Language) -> &'static spec::LanguageSpec {
    match lang {
        Language::TypeScript => &spec::TYPESCRIPT,
        Language::JavaScript => &spec::JAVASCRIPT,
        Language::Python => &spec::PYTHON,
        Language::Java | Language::Swift | Language::Scala => &spec::JAVA,
        Language::CSharp | Language::Cpp | Language::C => &spec::CSHARP,
        Language::Go => &spec::GO,
        Language::Rust => &spec::RUST,
        Language::Ruby => &spec::RUBY,
        Language::Php => &spec::PHP,
        Language::Kotlin => &spec::KOTLIN,
    }
}

/// Parse `source` with a pre-selected grammar, returning both the extracted
/// `ParseResult` and the raw tree-sitter `Tree` so callers that also need the
/// AST (the detection engine) avoid a redundant re-parse.
pub fn parse_with_language_and_tree(
    source: &[u8],
    path: &Path,
    lang: Language,
    ts_lang: tree_sitter::Language,
) -> Result<(ParseResult, tree_sitter::Tree), ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&ts_lang)
        .map_err(|e| ParseError::GrammarNotFound { language: e.to_string() })?;

    let tree = parser.parse(source, None).ok_or_else(|| ParseError::SyntaxError {
        path: path.display().to_string(),
        message: "tree-sitter produced no parse tree".to_string(),
    })?;

    let result = walk::extract(&tree, source, &path.display().to_string(), lang, spec_for_language(lang));
    Ok((result, tree))
}
