//! Duplicate elimination and dense renumbering.

use gramfst_core::{Target, VertexId};

use crate::index::Order;
use crate::subgraph::{BodyState, SubGraph};
use crate::Result;

/// Tombstone every arc identical in `(from, to, input, output)` to an arc
/// before it in forward order. Returns the number tombstoned.
pub fn dedup(sub: &mut SubGraph) -> Result<usize> {
    sub.sort(Order::Forward);
    let ordered = sub.ordered(Order::Forward)?;
    let mut repeated = Vec::new();
    let mut prev = None;
    for &id in ordered {
        let arc = sub.arc(id);
        if !arc.is_live() {
            break;
        }
        let key = Some((arc.from, arc.to, arc.input, arc.output));
        if key == prev {
            repeated.push(id);
        } else {
            prev = key;
        }
    }
    for &id in &repeated {
        sub.discard(id);
    }
    Ok(repeated.len())
}

/// Drop tombstones and renumber vertices to `0..N`.
///
/// The start vertex becomes 0; the others are numbered by first appearance
/// in arc order, source before destination.
pub fn compact(sub: &mut SubGraph) {
    let mut map: Vec<Option<VertexId>> = vec![None; sub.num_vertex() as usize];
    let mut next = 0;
    let mut assign = |v: VertexId| -> VertexId {
        *map[v as usize].get_or_insert_with(|| {
            next += 1;
            next - 1
        })
    };

    let start = assign(sub.start());
    let arcs: Vec<_> = sub
        .live_arcs()
        .map(|(_, arc)| {
            let from = assign(arc.from);
            let to = match arc.to {
                Target::Vertex(v) => Target::Vertex(assign(v)),
                other => other,
            };
            arc.rehomed(from, to)
        })
        .collect();

    // An end vertex with no arcs left has no number; acceptance is carried by
    // `Terminal` arcs by now.
    if let BodyState::Closed { end } = sub.body() {
        let end = map.get(end as usize).copied().flatten().unwrap_or(start);
        sub.set_body(BodyState::Closed { end });
    }
    sub.replace_arcs(arcs, next);
    sub.set_start(start);
}
