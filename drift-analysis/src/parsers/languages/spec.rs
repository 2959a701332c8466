//! Declarative per-grammar node-kind tables.
//!
//! Rather than hand-writing a bespoke tree-sitter walker per language, every
//! `LanguageParser` shares one walker (`super::walk::extract`) configured by
//! a `LanguageSpec` naming that grammar's node kinds for the constructs we
//! care about. Adding a language is a matter of filling in this table, not
//! writing a new traversal.

/// Node-kind names for one tree-sitter grammar.
pub struct LanguageSpec {
    /// Top-level and nested function/method declaration node kinds.
    pub function_kinds: &'static [&'static str],
    /// Class/interface/struct/impl declaration node kinds.
    pub class_kinds: &'static [&'static str],
    /// Import/use/require statement node kinds.
    pub import_kinds: &'static [&'static str],
    /// Call expression node kinds.
    pub call_kinds: &'static [&'static str],
    /// String literal node kinds.
    pub string_kinds: &'static [&'static str],
    /// Decorator/annotation/attribute node kinds.
    pub decorator_kinds: &'static [&'static str],
    /// Fallback identifier node kinds tried (in order) when a node has no
    /// `name` field, e.g. `property_identifier`, `field_identifier`.
    pub identifier_kinds: &'static [&'static str],
    /// Whether top-level declarations are exported by default absent an
    /// explicit export marker (true for Python/Ruby/PHP; false for
    /// JS/TS/Java/C#/Kotlin, which require an explicit keyword).
    pub export_by_default: bool,
    /// Catch/except/rescue clause node kinds (empty where the language has
    /// no exception-catching construct, e.g. Go, Rust).
    pub catch_kinds: &'static [&'static str],
    /// Line/block comment node kinds (almost always `["comment"]`; Java
    /// and Rust distinguish `line_comment`/`block_comment`).
    pub comment_kinds: &'static [&'static str],
}

pub static TYPESCRIPT: LanguageSpec = LanguageSpec {
    function_kinds: &["function_declaration", "method_definition", "function_signature", "arrow_function"],
    class_kinds: &["class_declaration", "interface_declaration"],
    import_kinds: &["import_statement"],
    call_kinds: &["call_expression"],
    string_kinds: &["string", "template_string"],
    decorator_kinds: &["decorator"],
    identifier_kinds: &["identifier", "property_identifier", "type_identifier"],
    export_by_default: false,
    catch_kinds: &["catch_clause"],
    comment_kinds: &["comment"],
};

pub static JAVASCRIPT: LanguageSpec = LanguageSpec {
    function_kinds: &["function_declaration", "method_definition", "arrow_function"],
    class_kinds: &["class_declaration"],
    import_kinds: &["import_statement"],
    call_kinds: &["call_expression"],
    string_kinds: &["string", "template_string"],
    decorator_kinds: &["decorator"],
    identifier_kinds: &["identifier", "property_identifier"],
    export_by_default: false,
    catch_kinds: &["catch_clause"],
    comment_kinds: &["comment"],
};

pub static PYTHON: LanguageSpec = LanguageSpec {
    function_kinds: &["function_definition"],
    class_kinds: &["class_definition"],
    import_kinds: &["import_statement", "import_from_statement"],
    call_kinds: &["call"],
    string_kinds: &["string"],
    decorator_kinds: &["decorator"],
    identifier_kinds: &["identifier"],
    export_by_default: true,
    catch_kinds: &["except_clause"],
    comment_kinds: &["comment"],
};

pub static JAVA: LanguageSpec = LanguageSpec {
    function_kinds: &["method_declaration", "constructor_declaration"],
    class_kinds: &["class_declaration", "interface_declaration"],
    import_kinds: &["import_declaration"],
    call_kinds: &["method_invocation", "object_creation_expression"],
    string_kinds: &["string_literal"],
    decorator_kinds: &["annotation", "marker_annotation"],
    identifier_kinds: &["identifier"],
    export_by_default: false,
    catch_kinds: &["catch_clause"],
    comment_kinds: &["line_comment", "block_comment"],
};

pub static CSHARP: LanguageSpec = LanguageSpec {
    function_kinds: &["method_declaration", "constructor_declaration", "local_function_statement"],
    class_kinds: &["class_declaration", "interface_declaration", "struct_declaration"],
    import_kinds: &["using_directive"],
    call_kinds: &["invocation_expression", "object_creation_expression"],
    string_kinds: &["string_literal", "raw_string_literal", "interpolated_string_expression"],
    decorator_kinds: &["attribute_list", "attribute"],
    identifier_kinds: &["identifier"],
    export_by_default: false,
    catch_kinds: &["catch_clause"],
    comment_kinds: &["comment"],
};

pub static GO: LanguageSpec = LanguageSpec {
    function_kinds: &["function_declaration", "method_declaration"],
    class_kinds: &["type_declaration"],
    import_kinds: &["import_declaration"],
    call_kinds: &["call_expression"],
    string_kinds: &["interpreted_string_literal", "raw_string_literal"],
    decorator_kinds: &[],
    identifier_kinds: &["identifier", "field_identifier", "type_identifier"],
    export_by_default: false,
    catch_kinds: &[],
    comment_kinds: &["comment"],
};

pub static RUST: LanguageSpec = LanguageSpec {
    function_kinds: &["function_item"],
    class_kinds: &["struct_item", "impl_item", "trait_item", "enum_item"],
    import_kinds: &["use_declaration"],
    call_kinds: &["call_expression"],
    string_kinds: &["string_literal", "raw_string_literal"],
    decorator_kinds: &["attribute_item"],
    identifier_kinds: &["identifier", "field_identifier", "type_identifier"],
    export_by_default: false,
    catch_kinds: &[],
    comment_kinds: &["line_comment", "block_comment"],
};

pub static RUBY: LanguageSpec = LanguageSpec {
    function_kinds: &["method", "singleton_method"],
    class_kinds: &["class", "module"],
    import_kinds: &["call"], // `require`/`require_relative` parse as ordinary calls
    call_kinds: &["call", "method_call"],
    string_kinds: &["string"],
    decorator_kinds: &[],
    identifier_kinds: &["identifier", "constant"],
    export_by_default: true,
    catch_kinds: &["rescue"],
    comment_kinds: &["comment"],
};

pub static PHP: LanguageSpec = LanguageSpec {
    function_kinds: &["function_definition", "method_declaration"],
    class_kinds: &["class_declaration", "interface_declaration"],
    import_kinds: &["namespace_use_declaration"],
    call_kinds: &["function_call_expression", "member_call_expression", "object_creation_expression"],
    string_kinds: &["string", "encapsed_string"],
    decorator_kinds: &["attribute_list"],
    identifier_kinds: &["name"],
    export_by_default: true,
    catch_kinds: &["catch_clause"],
    comment_kinds: &["comment"],
};

pub static KOTLIN: LanguageSpec = LanguageSpec {
    function_kinds: &["function_declaration"],
    class_kinds: &["class_declaration", "object_declaration"],
    import_kinds: &["import_header"],
    call_kinds: &["call_expression"],
    string_kinds: &["string_literal"],
    decorator_kinds: &["annotation"],
    identifier_kinds: &["simple_identifier", "type_identifier"],
    export_by_default: false,
    catch_kinds: &["catch_block"],
    comment_kinds: &["comment"],
};
