//! Call-site resolution for the call graph: map a `CallSite` to a callee key
//! using the indices `CallGraphBuilder` assembles from all parse results.
//!
//! Distinct from `engine::resolution::ResolutionIndex`, which resolves
//! symbols for the Phase 4 pipeline rather than call-graph edges.

use drift_core::types::collections::FxHashMap;

use crate::parsers::types::{CallSite, ImportInfo};

use super::types::Resolution;

/// Resolve a call site to a callee key (`"{file}::{name}"`) using, in order:
/// same-file direct match, qualified `receiver.method`/`Class.method` match,
/// any exported match, then an ambiguous dynamic fallback.
pub fn resolve_call(
    call_site: &CallSite,
    file: &str,
    language: &str,
    _imports: &[ImportInfo],
    name_index: &FxHashMap<String, Vec<String>>,
    qualified_index: &FxHashMap<String, String>,
    export_index: &FxHashMap<String, Vec<String>>,
    language_index: &FxHashMap<String, String>,
) -> Option<(String, Resolution)> {
    let candidates = name_index.get(&call_site.callee_name)?;

    // Strategy 1: Direct — unambiguous match in the caller's own file.
    let same_file_prefix = format!("{file}::");
    let same_file: Vec<&String> = candidates.iter().filter(|k| k.starts_with(&same_file_prefix)).collect();
    if same_file.len() == 1 {
        return Some((same_file[0].clone(), Resolution::Direct));
    }

    // Strategy 2: Qualified — `receiver.method` or `Class.method`.
    if let Some(receiver) = &call_site.receiver {
        let qualified_name = format!("{}.{}", receiver, call_site.callee_name);
        if let Some(key) = qualified_index.get(&qualified_name) {
            return Some((key.clone(), Resolution::Qualified));
        }
    }

    // Strategy 3: Exported — any exported symbol with this name, preferring
    // one in the same language (cross-language calls are rare enough to be
    // suspect).
    if let Some(exported) = export_index.get(&call_site.callee_name) {
        if let Some(same_lang) = exported.iter().find(|k| language_index.get(*k).map(String::as_str) == Some(language)) {
            return Some((same_lang.clone(), Resolution::Exported));
        }
        if let Some(first) = exported.first() {
            return Some((first.clone(), Resolution::Exported));
        }
    }

    // Strategy 4: Dynamic — ambiguous match, take the first candidate.
    candidates.first().map(|k| (k.clone(), Resolution::Dynamic))
}

/// Per-language call resolution counters, used to warn when a language's
/// calls are resolving poorly (usually a sign the grammar's call-site
/// extraction is missing a node kind).
#[derive(Debug, Default)]
pub struct ResolutionDiagnostics {
    per_strategy: FxHashMap<String, usize>,
    attempts_by_language: FxHashMap<String, usize>,
    resolved_by_language: FxHashMap<String, usize>,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolution attempt for `language`, successful or not.
    pub fn record(&mut self, resolution: Option<&Resolution>, language: &str) {
        *self.attempts_by_language.entry(language.to_string()).or_default() += 1;
        if let Some(r) = resolution {
            *self.per_strategy.entry(r.name().to_string()).or_default() += 1;
            *self.resolved_by_language.entry(language.to_string()).or_default() += 1;
        }
    }

    /// Human-readable warnings for languages with a resolution rate below
    /// 50%, once they have at least 10 attempted resolutions (below that,
    /// the rate is too noisy to act on).
    pub fn low_resolution_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (language, attempts) in &self.attempts_by_language {
            if *attempts < 10 {
                continue;
            }
            let resolved = self.resolved_by_language.get(language).copied().unwrap_or(0);
            let rate = resolved as f64 / *attempts as f64;
            if rate < 0.5 {
                warnings.push(format!(
                    "low call resolution rate for {language}: {:.0}% ({resolved}/{attempts})",
                    rate * 100.0
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_match_wins_when_unambiguous() {
        let mut name_index = FxHashMap::default();
        name_index.insert("helper".to_string(), vec!["a.ts::helper".to_string()]);
        let call = CallSite { line: 1, column: 0, callee_name: "helper".to_string(), receiver: None };
        let result = resolve_call(
            &call,
            "a.ts",
            "TypeScript",
            &[],
            &name_index,
            &FxHashMap::default(),
            &FxHashMap::default(),
            &FxHashMap::default(),
        );
        assert_eq!(result, Some(("a.ts::helper".to_string(), Resolution::Direct)));
    }

    #[test]
    fn diagnostics_warn_below_50_percent() {
        let mut diag = ResolutionDiagnostics::new();
        for _ in 0..8 {
            diag.record(None, "Ruby");
        }
        for _ in 0..2 {
            diag.record(Some(&Resolution::Dynamic), "Ruby");
        }
        let warnings = diag.low_resolution_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Ruby"));
    }
}
