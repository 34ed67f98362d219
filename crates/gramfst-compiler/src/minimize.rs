//! State-equivalence merging.
//!
//! Two vertices are equivalent when their outgoing arcs carry the same
//! `(input, output, destination)` triples once destinations already merged are
//! mapped to their representative. Vertices are bucketed by their backward
//! BFS distance from the terminal-owning vertices and only compared within a
//! bucket; buckets are swept nearest-to-terminal first so merges propagate
//! towards the start within one sweep.
//!
//! Each sweep is followed by re-homing, deduplication and compaction. Sweeps
//! repeat until one merges nothing or the iteration cap is hit.

use std::collections::{BTreeMap, HashMap, VecDeque};

use gramfst_core::{Label, Target, VertexId};

use crate::index::Order;
use crate::reduce::{compact, dedup};
use crate::subgraph::SubGraph;
use crate::trace::{Pass, Tracer};
use crate::Result;

/// Sorted outgoing `(input, output, destination)` triples.
type Signature = Vec<(Label, Label, Target)>;

/// Merge equivalent vertices. Returns the total number of vertices merged.
pub fn minimize(sub: &mut SubGraph, max_iterations: u32, tracer: &mut impl Tracer) -> Result<u32> {
    tracer.trace_pass_begin(Pass::Minimize, sub.stats());
    let mut total = 0;
    let mut converged = false;
    for _ in 0..max_iterations {
        let map = sweep(sub, tracer)?;
        let merged = map.iter().enumerate().filter(|&(v, &m)| v as u32 != m).count() as u32;
        if merged == 0 {
            converged = true;
            break;
        }
        total += merged;
        apply(sub, &map)?;
    }
    // A cap of 0 runs no sweep.
    if !converged && max_iterations > 0 {
        tracer.trace_not_converged(max_iterations);
    }
    tracer.trace_pass_end(Pass::Minimize, sub.stats());
    Ok(total)
}

/// Backward BFS distance from terminal-owning vertices; `u32::MAX` when no
/// terminal is reachable.
pub fn terminal_distance(sub: &mut SubGraph) -> Result<Vec<u32>> {
    sub.sort(Order::Backward);
    let mut rank = vec![u32::MAX; sub.num_vertex() as usize];
    let mut queue = VecDeque::new();
    for (_, arc) in sub.live_arcs() {
        if arc.is_terminal() && rank[arc.from as usize] == u32::MAX {
            rank[arc.from as usize] = 0;
            queue.push_back(arc.from);
        }
    }
    while let Some(v) = queue.pop_front() {
        for &id in sub.arcs_to(v)? {
            let u = sub.arc(id).from;
            if rank[u as usize] == u32::MAX {
                rank[u as usize] = rank[v as usize] + 1;
                queue.push_back(u);
            }
        }
    }
    Ok(rank)
}

/// One pass over all rank buckets. Returns the representative of every vertex.
fn sweep(sub: &mut SubGraph, tracer: &mut impl Tracer) -> Result<Vec<VertexId>> {
    let rank = terminal_distance(sub)?;
    sub.sort(Order::Forward);

    let mut buckets: BTreeMap<u32, Vec<VertexId>> = BTreeMap::new();
    for (v, &r) in rank.iter().enumerate() {
        buckets.entry(r).or_default().push(v as VertexId);
    }

    let mut map: Vec<VertexId> = (0..sub.num_vertex()).collect();
    for bucket in buckets.values() {
        let mut representatives: HashMap<Signature, VertexId> = HashMap::new();
        for &v in bucket {
            let signature = signature(sub, &map, v)?;
            let kept = *representatives.entry(signature).or_insert(v);
            if kept != v {
                map[v as usize] = kept;
                tracer.trace_equivalence_merge(kept, v);
            }
        }
    }
    Ok(map)
}

fn signature(sub: &SubGraph, map: &[VertexId], v: VertexId) -> Result<Signature> {
    let mut signature: Signature = sub
        .arcs_from(v)?
        .iter()
        .map(|&id| {
            let arc = sub.arc(id);
            let to = match arc.to {
                Target::Vertex(w) => Target::Vertex(map[w as usize]),
                other => other,
            };
            (arc.input, arc.output, to)
        })
        .collect();
    signature.sort_unstable();
    signature.dedup();
    Ok(signature)
}

/// Re-home every arc through `map`, then drop the duplicates this creates.
fn apply(sub: &mut SubGraph, map: &[VertexId]) -> Result<()> {
    let ids: Vec<_> = sub.live_arcs().map(|(id, _)| id).collect();
    for id in ids {
        sub.update_arc(id, |arc| *arc = arc.map_vertices(|v| map[v as usize]));
    }
    sub.set_start(map[sub.start() as usize]);
    dedup(sub)?;
    compact(sub);
    Ok(())
}
