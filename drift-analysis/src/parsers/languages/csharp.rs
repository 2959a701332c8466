//! C# `LanguageParser`. Also the fallback grammar for C and C++.

use std::path::Path;
use std::sync::Mutex;

use drift_core::errors::ParseError;

use super::shared::parse_with_spec;
use super::spec;
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

pub struct CSharpParser {
    parser: Mutex<tree_sitter::Parser>,
}

impl CSharpParser {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .expect("tree-sitter-c-sharp grammar should load");
        Self { parser: Mutex::new(parser) }
    }
}

impl Default for CSharpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for CSharpParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        // C/C++ route here as the closest available grammar.
        let lang = Language::from_extension(path.extension().and_then(|e| e.to_str())).unwrap_or(Language::CSharp);
        parse_with_spec(source, path, lang, &spec::CSHARP, &self.parser)
    }
}
