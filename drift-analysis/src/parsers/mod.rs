//! Tree-sitter-backed parsing: one `LanguageParser` per language, routed and
//! cached by `ParserManager`.

pub mod cache;
pub mod languages;
pub mod manager;
pub mod traits;
pub mod types;

pub use cache::ParseCache;
pub use languages::parse_with_language_and_tree;
pub use manager::ParserManager;
pub use traits::LanguageParser;
pub use types::{
    CallSite, ClassInfo, DecoratorInfo, ExportInfo, FunctionInfo, ImportInfo, ImportSpecifier,
    MethodInfo, Parameter, ParseResult, Position, Range, StringLiteral,
};
