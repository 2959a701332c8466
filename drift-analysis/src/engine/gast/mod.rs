//! Generalized AST (GAST) normalization.
//!
//! Folds each language's tree-sitter parse into a shared [`types::GASTNode`]
//! tree via a [`base_normalizer::GASTNormalizer`] implementation, so the
//! normalized-AST pass can run one detector set across every supported
//! language instead of duplicating it per-grammar.

pub mod base_normalizer;
pub mod normalizers;
pub mod types;

pub use base_normalizer::{BaseNormalizer, GASTNormalizer};
pub use types::GASTNode;

use crate::scanner::language_detect::Language;

/// Look up the normalizer for a language. Languages without a dedicated
/// override fall back to [`BaseNormalizer`], which still walks the tree
/// using the default construct table.
pub fn normalizer_for(language: Language) -> Box<dyn GASTNormalizer> {
    match language {
        Language::TypeScript | Language::JavaScript => Box::new(normalizers::TypeScriptNormalizer),
        Language::Python => Box::new(normalizers::PythonNormalizer),
        Language::Ruby => Box::new(normalizers::RubyNormalizer),
        Language::Cpp | Language::C => Box::new(normalizers::CppNormalizer),
        _ => Box::new(BaseNormalizer),
    }
}
