//! Structural checks on compiled graphs.
//!
//! These are the postconditions the pipeline promises. The `Compiler` runs
//! them after each stage when `CompileOptions::verify` is set; tests call them
//! directly.

use crate::index::Order;
use crate::minimize::terminal_distance;
use crate::subgraph::SubGraph;
use crate::Result;

/// Every live arc endpoint is below the vertex count.
pub fn vertex_bounds(sub: &SubGraph) -> Result<()> {
    sub.check_vertex_bounds()
}

/// No vertex has two outgoing arcs with identical `(input, output)` labels.
pub fn is_deterministic(sub: &mut SubGraph) -> Result<bool> {
    sub.sort(Order::ForMin);
    for v in 0..sub.num_vertex() {
        let run = sub.arcs_from_by_label(v)?;
        let repeated = run
            .windows(2)
            .any(|pair| sub.arc(pair[0]).labels() == sub.arc(pair[1]).labels());
        if repeated {
            return Ok(false);
        }
    }
    Ok(true)
}

/// No two vertices at the same distance from acceptance have identical
/// outgoing `(input, output, destination)` runs.
pub fn is_minimal(sub: &mut SubGraph) -> Result<bool> {
    let rank = terminal_distance(sub)?;
    sub.sort(Order::ForMin);
    let mut seen = std::collections::HashSet::new();
    for v in 0..sub.num_vertex() {
        let run: Vec<_> = sub
            .arcs_from_by_label(v)?
            .iter()
            .map(|&id| {
                let arc = sub.arc(id);
                (arc.input, arc.output, arc.to)
            })
            .collect();
        if !seen.insert((rank[v as usize], run)) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Every live arc lies on a path from the start vertex to a `Terminal` arc.
pub fn is_trim(sub: &SubGraph) -> Result<bool> {
    let mut copy = sub.clone();
    Ok(crate::reduce::prune(&mut copy)? == 0)
}
