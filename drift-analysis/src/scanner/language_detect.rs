//! Language detection by file extension.

use serde::{Deserialize, Serialize};

/// The languages the analysis engine understands.
///
/// `Cpp`, `C`, `Swift`, and `Scala` have no dedicated tree-sitter grammar in
/// this workspace; they are detected and routed through the closest
/// available parser (see `ParserManager::parser_for` and
/// `ts_language_for_ext`) rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Ruby,
    Go,
    Java,
    CSharp,
    Php,
    Kotlin,
    Rust,
    Cpp,
    C,
    Swift,
    Scala,
}

impl Language {
    /// Detect a language from a file extension (without the leading dot).
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext? {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            "py" | "pyi" => Some(Self::Python),
            "rb" | "rake" => Some(Self::Ruby),
            "go" => Some(Self::Go),
            "java" => Some(Self::Java),
            "cs" => Some(Self::CSharp),
            "php" => Some(Self::Php),
            "kt" | "kts" => Some(Self::Kotlin),
            "rs" => Some(Self::Rust),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some(Self::Cpp),
            "c" | "h" => Some(Self::C),
            "swift" => Some(Self::Swift),
            "scala" | "sc" => Some(Self::Scala),
            _ => None,
        }
    }

    /// Parse a language from its lowercase `name()`, for TOML-configured
    /// framework pack `languages` lists.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Some(Self::JavaScript),
            "typescript" | "ts" => Some(Self::TypeScript),
            "python" | "py" => Some(Self::Python),
            "ruby" | "rb" => Some(Self::Ruby),
            "go" | "golang" => Some(Self::Go),
            "java" => Some(Self::Java),
            "csharp" | "c#" => Some(Self::CSharp),
            "php" => Some(Self::Php),
            "kotlin" | "kt" => Some(Self::Kotlin),
            "rust" | "rs" => Some(Self::Rust),
            "cpp" | "c++" => Some(Self::Cpp),
            "c" => Some(Self::C),
            "swift" => Some(Self::Swift),
            "scala" => Some(Self::Scala),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Go => "go",
            Self::Java => "java",
            Self::CSharp => "csharp",
            Self::Php => "php",
            Self::Kotlin => "kotlin",
            Self::Rust => "rust",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Swift => "swift",
            Self::Scala => "scala",
        }
    }

    /// The tree-sitter grammar to parse this language's source with.
    ///
    /// Languages without a dedicated grammar fall back to the closest
    /// available one, matching `ParserManager::parser_for`: C/C++ parse with
    /// the C# grammar, Swift/Scala with the Java grammar. `ext` disambiguates
    /// TypeScript's two grammars (`.tsx` needs the TSX variant).
    pub fn ts_language_for_ext(&self, ext: Option<&str>) -> tree_sitter::Language {
        match self {
            Self::TypeScript => {
                if ext == Some("tsx") {
                    tree_sitter_typescript::LANGUAGE_TSX.into()
                } else {
                    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
                }
            }
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Java | Self::Swift | Self::Scala => tree_sitter_java::LANGUAGE.into(),
            Self::CSharp | Self::Cpp | Self::C => tree_sitter_c_sharp::LANGUAGE.into(),
            Self::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Self::Kotlin => tree_sitter_kotlin_sg::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }
}
