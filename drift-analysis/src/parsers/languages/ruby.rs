//! Ruby `LanguageParser`.

use std::path::Path;
use std::sync::Mutex;

use drift_core::errors::ParseError;

use super::shared::parse_with_spec;
use super::spec;
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

pub struct RubyParser {
    parser: Mutex<tree_sitter::Parser>,
}

impl RubyParser {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_ruby::LANGUAGE.into())
            .expect("tree-sitter-ruby grammar should load");
        Self { parser: Mutex::new(parser) }
    }
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for RubyParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        parse_with_spec(source, path, Language::Ruby, &spec::RUBY, &self.parser)
    }
}
