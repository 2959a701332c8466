//! PHP `LanguageParser`.

use std::path::Path;
use std::sync::Mutex;

use drift_core::errors::ParseError;

use super::shared::parse_with_spec;
use super::spec;
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

pub struct PhpParser {
    parser: Mutex<tree_sitter::Parser>,
}

impl PhpParser {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .expect("tree-sitter-php grammar should load");
        Self { parser: Mutex::new(parser) }
    }
}

impl Default for PhpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for PhpParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        parse_with_spec(source, path, Language::Php, &spec::PHP, &self.parser)
    }
}
