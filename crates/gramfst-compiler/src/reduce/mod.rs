//! Reduction pipeline for a flattened subgraph.
//!
//! 1. `remove_brackets` - eliminate epsilon and scope/rule bracket arcs
//! 2. `prune` - tombstone arcs off every start-to-terminal path
//! 3. `dedup` - tombstone repeated `(from, to, input, output)` arcs
//! 4. `compact` - drop tombstones and renumber vertices densely
//!
//! Every pass skips tombstoned arcs.

mod brackets;
mod compact;
mod prune;

#[cfg(test)]
mod prune_tests;

pub use brackets::{is_eliminable, remove_brackets};
pub use compact::{compact, dedup};
pub use prune::prune;

use crate::options::RuleMarkers;
use crate::subgraph::SubGraph;
use crate::trace::{Pass, Tracer};
use crate::Result;

/// Run the four reduction passes in order.
pub fn reduce(sub: &mut SubGraph, markers: RuleMarkers, tracer: &mut impl Tracer) -> Result<()> {
    tracer.trace_pass_begin(Pass::RemoveBrackets, sub.stats());
    remove_brackets(sub, markers);
    tracer.trace_pass_end(Pass::RemoveBrackets, sub.stats());

    tracer.trace_pass_begin(Pass::Prune, sub.stats());
    prune(sub)?;
    tracer.trace_pass_end(Pass::Prune, sub.stats());

    tracer.trace_pass_begin(Pass::Dedup, sub.stats());
    dedup(sub)?;
    tracer.trace_pass_end(Pass::Dedup, sub.stats());

    tracer.trace_pass_begin(Pass::Compact, sub.stats());
    compact(sub);
    tracer.trace_pass_end(Pass::Compact, sub.stats());
    Ok(())
}
