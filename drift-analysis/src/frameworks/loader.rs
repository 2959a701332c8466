//! Compiles a `FrameworkSpec` (raw TOML schema) into a `CompiledFrameworkPack`
//! whose match blocks carry ready-to-use `AhoCorasick`/`RegexSet`/`glob::Pattern`
//! fast-path matchers instead of raw strings.

use std::path::Path;

use aho_corasick::AhoCorasick;
use regex::{Regex, RegexSet};
use smallvec::SmallVec;

use drift_core::errors::DetectionError;

use crate::engine::types::PatternCategory;
use crate::scanner::language_detect::Language;

use super::types::{DetectSignal, FrameworkSpec, MatchBlock, PatternDef};

/// A compiled framework pack, ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledFrameworkPack {
    pub name: String,
    pub version: Option<String>,
    pub languages: Vec<Language>,
    pub detect_signals: Vec<CompiledDetectSignal>,
    pub patterns: Vec<CompiledPattern>,
}

/// A compiled detection signal, used to decide whether a pack is active for
/// a project before its patterns are matched file by file.
#[derive(Debug, Clone)]
pub enum CompiledDetectSignal {
    Import(String),
    FilePattern(glob::Pattern),
    Decorator(String),
    Dependency(String),
}

/// A compiled call-site predicate (`receiver.method` or bare `method`).
#[derive(Debug, Clone)]
pub struct CompiledCall {
    pub receiver: Option<String>,
    pub method: String,
}

/// A compiled pattern: the match block plus the metadata attached to a hit.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub id: String,
    pub category: PatternCategory,
    pub sub_type: Option<String>,
    pub confidence: f32,
    pub cwe_ids: SmallVec<[u32; 2]>,
    pub owasp: Option<String>,
    pub match_block: CompiledMatchBlock,
    pub has_learn: bool,
    pub learn_signal: Option<String>,
    pub learn_group_by: Option<String>,
    pub learn_deviation_threshold: f64,
}

/// A compiled match block. Raw string/regex predicates from `MatchBlock` are
/// kept alongside their fast-path matchers so the matcher can fall back to a
/// per-pattern linear scan if a fast-path failed to compile.
#[derive(Debug, Clone, Default)]
pub struct CompiledMatchBlock {
    pub imports: Vec<String>,
    pub import_ac: Option<AhoCorasick>,
    pub decorators: Vec<String>,
    pub decorator_ac: Option<AhoCorasick>,
    pub calls: Vec<CompiledCall>,
    pub extends: Vec<String>,
    pub extends_ac: Option<AhoCorasick>,
    pub implements: Vec<String>,
    pub implements_ac: Option<AhoCorasick>,
    pub function_names: Vec<Regex>,
    pub function_name_regex_set: Option<RegexSet>,
    pub class_names: Vec<Regex>,
    pub class_name_regex_set: Option<RegexSet>,
    pub string_literals: Vec<Regex>,
    pub string_literal_regex_set: Option<RegexSet>,
    pub param_types: Vec<String>,
    pub return_types: Vec<String>,
    pub content_patterns: Vec<Regex>,
    pub content_regex_set: Option<RegexSet>,
    pub exports: Vec<String>,
    pub error_handling: Vec<String>,
    pub doc_comments: Vec<Regex>,
    pub doc_comment_regex_set: Option<RegexSet>,
    pub file_patterns: Vec<glob::Pattern>,
    pub type_annotations: Vec<Regex>,
    pub type_annotation_regex_set: Option<RegexSet>,
    pub language: Option<Language>,
    pub not: Option<Box<CompiledMatchBlock>>,
}

/// Parse and compile a framework pack from a TOML source string.
pub fn load_from_str(toml_str: &str) -> Result<CompiledFrameworkPack, DetectionError> {
    let spec: FrameworkSpec =
        toml::from_str(toml_str).map_err(|e| DetectionError::InvalidPattern(e.to_string()))?;
    compile(spec)
}

/// Parse and compile a framework pack from a TOML file on disk.
pub fn load_from_file(path: &Path) -> Result<CompiledFrameworkPack, DetectionError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DetectionError::InvalidPattern(format!("{}: {e}", path.display())))?;
    load_from_str(&content)
}

fn compile(spec: FrameworkSpec) -> Result<CompiledFrameworkPack, DetectionError> {
    let languages: Vec<Language> = spec
        .framework
        .languages
        .iter()
        .filter_map(|name| Language::from_name(name))
        .collect();

    let detect_signals = spec
        .framework
        .detect_by
        .iter()
        .map(compile_detect_signal)
        .collect::<Result<Vec<_>, _>>()?;

    let patterns = spec
        .patterns
        .into_iter()
        .map(compile_pattern)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledFrameworkPack {
        name: spec.framework.name,
        version: spec.framework.version,
        languages,
        detect_signals,
        patterns,
    })
}

fn compile_detect_signal(signal: &DetectSignal) -> Result<CompiledDetectSignal, DetectionError> {
    Ok(match signal {
        DetectSignal::Import { import } => CompiledDetectSignal::Import(import.clone()),
        DetectSignal::FilePattern { file_pattern } => {
            let pat = glob::Pattern::new(file_pattern)
                .map_err(|e| DetectionError::InvalidPattern(e.to_string()))?;
            CompiledDetectSignal::FilePattern(pat)
        }
        DetectSignal::Decorator { decorator } => CompiledDetectSignal::Decorator(decorator.clone()),
        DetectSignal::Dependency { dependency } => CompiledDetectSignal::Dependency(dependency.clone()),
    })
}

fn compile_pattern(def: PatternDef) -> Result<CompiledPattern, DetectionError> {
    let category = parse_category(&def.category)
        .ok_or_else(|| DetectionError::InvalidPattern(format!("unknown category: {}", def.category)))?;

    let match_block = compile_match_block(&def.match_predicates)?;

    let (has_learn, learn_signal, learn_group_by, learn_deviation_threshold) = match def.learn {
        Some(learn) => (true, Some(learn.signal), Some(learn.group_by), learn.deviation_threshold),
        None => (false, None, None, 0.15),
    };

    Ok(CompiledPattern {
        id: def.id,
        category,
        sub_type: def.sub_type,
        confidence: def.confidence,
        cwe_ids: SmallVec::from_vec(def.cwe_ids),
        owasp: def.owasp,
        match_block,
        has_learn,
        learn_signal,
        learn_group_by,
        learn_deviation_threshold,
    })
}

fn compile_match_block(block: &MatchBlock) -> Result<CompiledMatchBlock, DetectionError> {
    let import_ac = build_ac(&block.imports);
    let decorator_ac = build_ac(&block.decorators);
    let extends_ac = build_ac(&block.extends);
    let implements_ac = build_ac(&block.implements);

    let calls = block
        .calls
        .iter()
        .map(|c| compile_call(c))
        .collect::<Vec<_>>();

    let function_names = compile_regexes(&block.function_names)?;
    let function_name_regex_set = build_regex_set(&block.function_names);

    let class_names = compile_regexes(&block.class_names)?;
    let class_name_regex_set = build_regex_set(&block.class_names);

    let string_literals = compile_regexes(&block.string_literals)?;
    let string_literal_regex_set = build_regex_set(&block.string_literals);

    let content_patterns = compile_regexes(&block.content_patterns)?;
    let content_regex_set = build_regex_set(&block.content_patterns);

    let doc_comments = compile_regexes(&block.doc_comments)?;
    let doc_comment_regex_set = build_regex_set(&block.doc_comments);

    let type_annotations = compile_regexes(&block.type_annotations)?;
    let type_annotation_regex_set = build_regex_set(&block.type_annotations);

    let file_patterns = block
        .file_patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(|e| DetectionError::InvalidPattern(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let language = block.language.as_deref().and_then(Language::from_name);

    let not = match &block.not {
        Some(inner) => Some(Box::new(compile_match_block(inner)?)),
        None => None,
    };

    Ok(CompiledMatchBlock {
        imports: block.imports.clone(),
        import_ac,
        decorators: block.decorators.clone(),
        decorator_ac,
        calls,
        extends: block.extends.clone(),
        extends_ac,
        implements: block.implements.clone(),
        implements_ac,
        function_names,
        function_name_regex_set,
        class_names,
        class_name_regex_set,
        string_literals,
        string_literal_regex_set,
        param_types: block.param_types.clone(),
        return_types: block.return_types.clone(),
        content_patterns,
        content_regex_set,
        exports: block.exports.clone(),
        error_handling: block.error_handling.clone(),
        doc_comments,
        doc_comment_regex_set,
        file_patterns,
        type_annotations,
        type_annotation_regex_set,
        language,
        not,
    })
}

/// Accepts `PatternCategory::parse_str`'s snake_case strings as well as the
/// PascalCase spelling pack authors naturally reach for ("DataAccess").
fn parse_category(s: &str) -> Option<PatternCategory> {
    if let Some(cat) = PatternCategory::parse_str(s) {
        return Some(cat);
    }
    let mut snake = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            snake.push('_');
        }
        snake.extend(c.to_lowercase());
    }
    PatternCategory::parse_str(&snake)
}

fn compile_call(raw: &str) -> CompiledCall {
    match raw.split_once('.') {
        Some((receiver, method)) => CompiledCall {
            receiver: Some(receiver.to_string()),
            method: method.to_string(),
        },
        None => CompiledCall { receiver: None, method: raw.to_string() },
    }
}

fn compile_regexes(patterns: &[String]) -> Result<Vec<Regex>, DetectionError> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(|e| DetectionError::RegexCompile(e.to_string())))
        .collect()
}

/// `RegexSet` is a pure fast path; a pack author's typo shouldn't fail the
/// whole pack, so compilation failures just disable the fast path.
fn build_regex_set(patterns: &[String]) -> Option<RegexSet> {
    if patterns.is_empty() {
        return None;
    }
    RegexSet::new(patterns).ok()
}

fn build_ac(patterns: &[String]) -> Option<AhoCorasick> {
    if patterns.is_empty() {
        return None;
    }
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(patterns)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [framework]
        name = "test-fw"
        languages = ["typescript"]

        [[patterns]]
        id = "test/fw/001"
        category = "Api"
        confidence = 0.7

        [patterns.match]
        imports = ["express"]
    "#;

    #[test]
    fn compiles_minimal_pack() {
        let pack = load_from_str(MINIMAL).expect("should compile");
        assert_eq!(pack.name, "test-fw");
        assert_eq!(pack.languages, vec![Language::TypeScript]);
        assert_eq!(pack.patterns.len(), 1);
        assert_eq!(pack.patterns[0].category, PatternCategory::Api);
        assert!(pack.patterns[0].match_block.import_ac.is_some());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let toml_str = r#"
            [framework]
            name = "bad-fw"
            languages = ["python"]

            [[patterns]]
            id = "bad/001"
            category = "NotACategory"

            [patterns.match]
            imports = ["foo"]
        "#;
        assert!(load_from_str(toml_str).is_err());
    }

    #[test]
    fn call_predicate_splits_receiver_and_method() {
        let call = compile_call("db.query");
        assert_eq!(call.receiver.as_deref(), Some("db"));
        assert_eq!(call.method, "query");

        let bare = compile_call("eval");
        assert_eq!(bare.receiver, None);
        assert_eq!(bare.method, "eval");
    }
}
