//! Bracket and epsilon elimination.
//!
//! Each eliminable arc `u → v` is removed one at a time, after its effect is
//! pulled onto neighbouring real arcs:
//!
//! - forward pull: every real arc leaving the epsilon-closure of `v` is
//!   copied onto `u`
//! - backward pull: every real arc entering the reverse epsilon-closure of
//!   `u` is copied onto `v`
//!
//! Begin brackets pull forward; end brackets and plain epsilons pull
//! backward unless the start vertex is in the reverse closure of `u`, where
//! a path can reach `u` without consuming a real arc.

use std::collections::{BTreeSet, HashSet};

use gramfst_core::{Arc, Label, Target, VertexId};

use crate::options::RuleMarkers;
use crate::subgraph::{ArcId, SubGraph};

/// Whether `arc` is a live structural arc carrying nothing.
pub fn is_eliminable(arc: &Arc, markers: RuleMarkers) -> bool {
    if arc.to.vertex().is_none() {
        return false;
    }
    let structural = arc.input.is_epsilon() || arc.input.is_bracket();
    let silent = match arc.output {
        Label::Epsilon => true,
        Label::Rule(_) => arc.input == Label::EndRule && markers == RuleMarkers::Drop,
        _ => false,
    };
    structural && silent
}

/// Per-vertex arc lists kept current while the pass adds arcs.
struct LocalAdjacency {
    out: Vec<Vec<ArcId>>,
    inc: Vec<Vec<ArcId>>,
}

impl LocalAdjacency {
    fn new(sub: &SubGraph) -> Self {
        let n = sub.num_vertex() as usize;
        let mut adj = Self {
            out: vec![Vec::new(); n],
            inc: vec![Vec::new(); n],
        };
        for (id, arc) in sub.live_arcs() {
            adj.insert(id, arc);
        }
        adj
    }

    fn insert(&mut self, id: ArcId, arc: &Arc) {
        self.out[arc.from as usize].push(id);
        if let Some(to) = arc.to.vertex() {
            self.inc[to as usize].push(id);
        }
    }
}

struct BracketRemover<'a> {
    sub: &'a mut SubGraph,
    markers: RuleMarkers,
    adj: LocalAdjacency,
    live: HashSet<Arc>,
}

/// Eliminate every eliminable arc. Returns how many were removed.
pub fn remove_brackets(sub: &mut SubGraph, markers: RuleMarkers) -> usize {
    let adj = LocalAdjacency::new(sub);
    let live = sub.live_arcs().map(|(_, arc)| *arc).collect();
    let mut remover = BracketRemover {
        sub,
        markers,
        adj,
        live,
    };
    remover.run()
}

impl BracketRemover<'_> {
    fn eliminable(&self, id: ArcId) -> bool {
        let arc = self.sub.arc(id);
        arc.is_live() && is_eliminable(arc, self.markers)
    }

    fn run(&mut self) -> usize {
        // Pulled copies are never eliminable, so the original arcs are all
        // the work there is.
        let pending = self.sub.arcs().len();
        let mut removed = 0;
        for id in 0..pending {
            if !self.eliminable(id) {
                continue;
            }
            let arc = *self.sub.arc(id);
            let (u, v) = (arc.from, arc.ensure_to_vertex());
            if u != v {
                let pull_back = matches!(
                    arc.input,
                    Label::Epsilon | Label::EndScope | Label::EndRule
                );
                if pull_back {
                    let closure = self.closure(u, Direction::Backward);
                    if closure.contains(&self.sub.start()) {
                        self.pull_forward(u, v);
                    } else {
                        self.pull_backward(&closure, v);
                    }
                } else {
                    self.pull_forward(u, v);
                }
            }
            self.live.remove(&arc);
            self.sub.discard(id);
            removed += 1;
        }
        removed
    }

    /// Vertices reachable from `v` through eliminable arcs, `v` included.
    fn closure(&self, v: VertexId, direction: Direction) -> BTreeSet<VertexId> {
        let mut seen = BTreeSet::from([v]);
        let mut stack = vec![v];
        while let Some(x) = stack.pop() {
            let lists = match direction {
                Direction::Forward => &self.adj.out,
                Direction::Backward => &self.adj.inc,
            };
            for &id in &lists[x as usize] {
                if !self.eliminable(id) {
                    continue;
                }
                let arc = self.sub.arc(id);
                let next = match direction {
                    Direction::Forward => arc.ensure_to_vertex(),
                    Direction::Backward => arc.from,
                };
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen
    }

    fn pull_forward(&mut self, u: VertexId, v: VertexId) {
        let closure = self.closure(v, Direction::Forward);
        let copies: Vec<Arc> = closure
            .iter()
            .flat_map(|&w| &self.adj.out[w as usize])
            .filter(|&&id| self.is_real(id))
            .map(|&id| {
                let arc = self.sub.arc(id);
                arc.rehomed(u, arc.to)
            })
            .collect();
        self.add_all(copies);
    }

    fn pull_backward(&mut self, closure: &BTreeSet<VertexId>, v: VertexId) {
        let copies: Vec<Arc> = closure
            .iter()
            .flat_map(|&w| &self.adj.inc[w as usize])
            .filter(|&&id| self.is_real(id))
            .map(|&id| {
                let arc = self.sub.arc(id);
                arc.rehomed(arc.from, Target::Vertex(v))
            })
            .collect();
        self.add_all(copies);
    }

    fn is_real(&self, id: ArcId) -> bool {
        let arc = self.sub.arc(id);
        arc.is_live() && !is_eliminable(arc, self.markers)
    }

    fn add_all(&mut self, copies: Vec<Arc>) {
        for arc in copies {
            if self.live.insert(arc) {
                let id = self.sub.push_arc(arc);
                self.adj.insert(id, &arc);
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}
