//! The trait every per-language parser implements, and `ParserManager`
//! dispatches on.

use std::path::Path;

use drift_core::errors::ParseError;

use super::types::ParseResult;

/// A language-specific tree-sitter-backed parser.
///
/// Implementations extract a `ParseResult` in a single walk of the parsed
/// tree. Parsers are stateless — safe to share across threads via `&self`.
pub trait LanguageParser: Send + Sync {
    /// Parse `source` (from file `path`) into a `ParseResult`.
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError>;
}
