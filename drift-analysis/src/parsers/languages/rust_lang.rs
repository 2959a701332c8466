//! Rust `LanguageParser`. Named `rust_lang` to avoid shadowing the `rust`
//! keyword-adjacent crate path.

use std::path::Path;
use std::sync::Mutex;

use drift_core::errors::ParseError;

use super::shared::parse_with_spec;
use super::spec;
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

pub struct RustParser {
    parser: Mutex<tree_sitter::Parser>,
}

impl RustParser {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .expect("tree-sitter-rust grammar should load");
        Self { parser: Mutex::new(parser) }
    }
}

impl Default for RustParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for RustParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        parse_with_spec(source, path, Language::Rust, &spec::RUST, &self.parser)
    }
}
