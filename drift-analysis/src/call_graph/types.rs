//! Call graph node/edge types and the `petgraph`-backed graph itself.

use std::time::Duration;

use drift_core::types::collections::FxHashMap;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;

use super::resolution::ResolutionDiagnostics;

/// A function or method, one node per graph entry.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub file: String,
    pub name: String,
    pub qualified_name: Option<String>,
    pub language: String,
    pub line: u32,
    pub end_line: u32,
    pub is_entry_point: bool,
    pub is_exported: bool,
    pub signature_hash: u64,
    pub body_hash: u64,
}

/// How a call site was resolved to its callee, local to the call graph
/// (distinct from `engine::resolution::ResolutionStrategy`, which resolves
/// symbols for the Phase 4 resolution index rather than graph edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Unambiguous same-file match.
    Direct,
    /// Matched via a qualified `receiver.method` or `Class.method` name.
    Qualified,
    /// Matched an exported symbol from another file.
    Exported,
    /// Matched via dependency-injection framework detection.
    DiInjection,
    /// Ambiguous or reflection-based; lowest confidence.
    Dynamic,
}

impl Resolution {
    /// Default confidence for this resolution kind.
    pub fn default_confidence(&self) -> f32 {
        match self {
            Self::Direct => 0.95,
            Self::Qualified => 0.90,
            Self::Exported => 0.75,
            Self::DiInjection => 0.80,
            Self::Dynamic => 0.50,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Qualified => "qualified",
            Self::Exported => "exported",
            Self::DiInjection => "di_injection",
            Self::Dynamic => "dynamic",
        }
    }
}

/// A resolved call-site edge.
#[derive(Debug, Clone)]
pub struct CallEdge {
    pub resolution: Resolution,
    pub confidence: f32,
    pub call_site_line: u32,
}

/// The call graph: functions/methods as nodes, resolved calls as edges.
///
/// Wraps `StableGraph` so node indices stay valid across incremental
/// rebuilds that remove nodes for changed files.
pub struct CallGraph {
    pub graph: StableGraph<FunctionNode, CallEdge>,
    index: FxHashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            index: FxHashMap::default(),
        }
    }

    /// Add a function node, keyed by `"{file}::{name}"` for `get_node` lookup.
    pub fn add_function(&mut self, node: FunctionNode) -> NodeIndex {
        let key = format!("{}::{}", node.file, node.name);
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Look up a node by its `"{file}::{name}"` key.
    pub fn get_node(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn add_edge(&mut self, caller: NodeIndex, callee: NodeIndex, edge: CallEdge) {
        self.graph.add_edge(caller, callee, edge);
    }

    pub fn function_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics from a call graph build.
#[derive(Debug)]
pub struct CallGraphStats {
    pub total_functions: usize,
    pub total_edges: usize,
    pub entry_points: usize,
    pub resolution_counts: FxHashMap<String, usize>,
    pub resolution_rate: f64,
    pub build_duration: Duration,
    pub cycles_detected: usize,
    pub diagnostics: ResolutionDiagnostics,
}
