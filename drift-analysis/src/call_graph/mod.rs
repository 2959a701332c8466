//! Call graph construction: parallel function extraction, call-site
//! resolution (with DI-framework fallback), entry-point detection, and BFS
//! traversal.

pub mod builder;
pub mod di_support;
pub mod resolution;
pub mod traversal;
pub mod types;

pub use builder::CallGraphBuilder;
pub use types::{CallEdge, CallGraph, CallGraphStats, FunctionNode, Resolution};
