//! C/C++ GAST normalizer.
//!
//! C and C++ have no dedicated tree-sitter grammar in this workspace and
//! parse through the C# grammar (see `Language::ts_language_for_ext`), so
//! this normalizer only overrides the handful of constructs whose C# node
//! kinds diverge enough from the default table to misclassify: `struct`
//! base-list extraction is otherwise dropped entirely.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::GASTNormalizer;
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct CppNormalizer;

impl GASTNormalizer for CppNormalizer {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn normalize_class(&self, node: &Node, source: &[u8]) -> GASTNode {
        let name = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .unwrap_or("")
            .to_string();
        let bases = node
            .child_by_field_name("bases")
            .map(|n| self.normalize_children(&n, source))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|n| match n {
                GASTNode::Identifier { name } => Some(name),
                GASTNode::Other { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        let body = node
            .child_by_field_name("body")
            .map(|n| self.normalize_children(&n, source))
            .unwrap_or_default();

        GASTNode::Class { name, bases, body, is_abstract: false }
    }
}
