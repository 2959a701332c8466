//! Java `LanguageParser`. Also the fallback grammar for Swift and Scala.

use std::path::Path;
use std::sync::Mutex;

use drift_core::errors::ParseError;

use super::shared::parse_with_spec;
use super::spec;
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

pub struct JavaParser {
    parser: Mutex<tree_sitter::Parser>,
}

impl JavaParser {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .expect("tree-sitter-java grammar should load");
        Self { parser: Mutex::new(parser) }
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for JavaParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        // Swift/Scala route here as the closest available grammar; keep the
        // detected language (rather than hardcoding Java) so callers that
        // inspect `result.language` before ParserManager overwrites it still
        // see the right value.
        let lang = Language::from_extension(path.extension().and_then(|e| e.to_str())).unwrap_or(Language::Java);
        parse_with_spec(source, path, lang, &spec::JAVA, &self.parser)
    }
}
