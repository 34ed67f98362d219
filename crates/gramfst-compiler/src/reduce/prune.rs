//! Reachability pruning.

use gramfst_core::Target;

use crate::index::Order;
use crate::subgraph::SubGraph;
use crate::Result;

/// Tombstone every arc that is not on some path from the start vertex to a
/// `Terminal` arc. Returns the number of arcs tombstoned.
pub fn prune(sub: &mut SubGraph) -> Result<usize> {
    let n = sub.num_vertex() as usize;
    sub.sort(Order::Forward);
    sub.sort(Order::Backward);

    let mut reachable = vec![false; n];
    let mut stack = Vec::new();
    if (sub.start() as usize) < n {
        reachable[sub.start() as usize] = true;
        stack.push(sub.start());
    }
    while let Some(v) = stack.pop() {
        for &id in sub.arcs_from(v)? {
            if let Some(w) = sub.arc(id).to.vertex()
                && !reachable[w as usize]
            {
                reachable[w as usize] = true;
                stack.push(w);
            }
        }
    }

    let mut coreachable = vec![false; n];
    for (_, arc) in sub.live_arcs() {
        if arc.is_terminal() && !coreachable[arc.from as usize] {
            coreachable[arc.from as usize] = true;
            stack.push(arc.from);
        }
    }
    while let Some(v) = stack.pop() {
        for &id in sub.arcs_to(v)? {
            let u = sub.arc(id).from;
            if !coreachable[u as usize] {
                coreachable[u as usize] = true;
                stack.push(u);
            }
        }
    }

    let dead: Vec<_> = sub
        .live_arcs()
        .filter(|(_, arc)| {
            let on_path = match arc.to {
                Target::Vertex(w) => coreachable[w as usize],
                Target::Terminal => true,
                Target::Discard => false,
            };
            !(reachable[arc.from as usize] && on_path)
        })
        .map(|(id, _)| id)
        .collect();
    for &id in &dead {
        sub.discard(id);
    }
    Ok(dead.len())
}
