//! Python `LanguageParser`.

use std::path::Path;
use std::sync::Mutex;

use drift_core::errors::ParseError;

use super::shared::parse_with_spec;
use super::spec;
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

pub struct PythonParser {
    parser: Mutex<tree_sitter::Parser>,
}

impl PythonParser {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("tree-sitter-python grammar should load");
        Self { parser: Mutex::new(parser) }
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for PythonParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        parse_with_spec(source, path, Language::Python, &spec::PYTHON, &self.parser)
    }
}
