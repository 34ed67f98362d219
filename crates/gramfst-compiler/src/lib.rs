//! gramfst compiler: grammar rules to a single flattened transition graph.
//!
//! Pipeline:
//! - `subgraph` - per-rule arc sets built through a scoped builder protocol
//! - `graph` - rule registry, forward references, rule inlining
//! - `reduce` - bracket removal, reachability pruning, duplicate elimination, renumbering
//! - `minimize` - state-equivalence merging
//! - `determinize` - pairwise state merging with memoized merge vertices
//! - `pipeline` - the `Compiler` facade sequencing the stages
//!
//! Supporting modules: `index` (sorted adjacency permutations), `trace`
//! (pass instrumentation), `options`, `dump`, `verify`, and `grammar` (a JSON
//! grammar driver issuing builder calls).

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod determinize;
pub mod dump;
pub mod grammar;
pub mod graph;
pub mod index;
pub mod minimize;
pub mod options;
pub mod pipeline;
pub mod reduce;
pub mod subgraph;
pub mod trace;
pub mod verify;

mod silence;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
mod trace_tests;

use gramfst_core::{RuleId, VertexId};

pub use graph::Graph;
pub use index::Order;
pub use options::{CompileOptions, CompileOptionsBuilder, RuleMarkers};
pub use pipeline::{Compiler, Stage};
pub use subgraph::{ArcId, ScopeKind, SubGraph};
pub use trace::{GraphStats, NoopTracer, Pass, PrintTracer, Tracer, Verbosity};

/// Errors that abort a compilation.
///
/// Every variant is fatal: the pipeline produces either a complete graph or
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An adjacency permutation was queried after an arc mutation.
    #[error("{order} adjacency index queried after the graph was modified")]
    StaleIndex { order: Order },

    #[error("rule {rule} is referenced but never defined")]
    UndefinedRule { rule: RuleId },

    #[error("rule {rule} is defined more than once")]
    DuplicateRule { rule: RuleId },

    /// Builder call on a placeholder or an already finished rule body.
    #[error("rule {rule} is not open for building")]
    RuleNotOpen { rule: RuleId },

    #[error("invalid repeat range {min}..={max}")]
    InvalidRange { min: u32, max: u32 },

    #[error("end of scope without a matching begin")]
    ScopeUnderflow,

    #[error("rule {rule} ended with {open} unclosed scope(s)")]
    UnbalancedScope { rule: RuleId, open: usize },

    /// Expansion fuel exhausted, usually a cyclic rule reference.
    #[error("rule expansion limit exceeded after {expansions} expansions")]
    ExpansionLimitExceeded { expansions: u32 },

    #[error("vertex {vertex}: cached reference count {cached} disagrees with recomputed {actual}")]
    InconsistentRefCount {
        vertex: VertexId,
        cached: u32,
        actual: u32,
    },

    #[error("arc {arc} references vertex {vertex} outside 0..{num_vertex}")]
    VertexOutOfBounds {
        arc: ArcId,
        vertex: VertexId,
        num_vertex: u32,
    },

    #[error("unknown rule `{0}`")]
    UnknownRuleName(String),

    #[error("invalid grammar document: {0}")]
    Json(String),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
