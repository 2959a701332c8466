//! Shared parse-and-extract helper used by every per-language `LanguageParser`.

use std::path::Path;
use std::sync::Mutex;

use drift_core::errors::ParseError;

use super::spec::LanguageSpec;
use super::walk;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

/// Re-configure `parser` for `language`/`path`'s grammar, parse `source`,
/// and extract a `ParseResult` via the shared walker.
pub fn parse_with_spec(
    source: &[u8],
    path: &Path,
    language: Language,
    spec: &LanguageSpec,
    parser: &Mutex<tree_sitter::Parser>,
) -> Result<ParseResult, ParseError> {
    let ext = path.extension().and_then(|e| e.to_str());
    let ts_lang = language.ts_language_for_ext(ext);

    let mut parser = parser.lock().expect("parser mutex poisoned");
    parser.set_language(&ts_lang).map_err(|e| ParseError::GrammarNotFound { language: e.to_string() })?;

    let tree = parser.parse(source, None).ok_or_else(|| ParseError::SyntaxError {
        path: path.display().to_string(),
        message: "tree-sitter produced no parse tree".to_string(),
    })?;

    Ok(walk::extract(&tree, source, &path.display().to_string(), language, spec))
}
