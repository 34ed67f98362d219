//! Determinization by pairwise state merging.
//!
//! Every live vertex keeps a working run of its outgoing arcs sorted by
//! `(input, output, destination)`, seeded from the for-min order. Scanning a
//! run, two adjacent arcs with the same labels are collapsed into one:
//!
//! - same destination: the second arc is dropped
//! - otherwise both destinations are replaced by a vertex standing for the
//!   union of their languages
//!
//! A vertex stands for a set of original vertices (its members). The union
//! target is a destination whose members already cover both, else a merged
//! vertex looked up in (or added to) a memo keyed by the member set. A merged
//! vertex's run is the sorted, deduplicated union of its sources' runs.
//!
//! Liveness is tracked with reference counts: live arcs leaving live
//! vertices, plus one for the start vertex. A vertex dropping to zero releases
//! its own arcs' targets. Dead vertices keep their arcs until the final prune.

use std::collections::{BTreeSet, HashMap};

use gramfst_core::{Arc, Target, VertexId};

use crate::index::Order;
use crate::reduce::{compact, prune};
use crate::subgraph::{ArcId, SubGraph};
use crate::trace::{Pass, Tracer};
use crate::{Error, Result};

/// Make `sub` deterministic in its `(input, output)` labels, then prune and
/// compact it. Returns the number of merged vertices created.
pub fn determinize(sub: &mut SubGraph, verify: bool, tracer: &mut impl Tracer) -> Result<u32> {
    tracer.trace_pass_begin(Pass::Determinize, sub.stats());
    let mut engine = Determinizer::new(sub, tracer)?;
    engine.run()?;
    if verify {
        engine.consistency_check()?;
    }
    let created = engine.created;
    prune(sub)?;
    compact(sub);
    tracer.trace_pass_end(Pass::Determinize, sub.stats());
    Ok(created)
}

struct Determinizer<'a, T: Tracer> {
    sub: &'a mut SubGraph,
    tracer: &'a mut T,
    /// Working run of outgoing arc ids per vertex.
    runs: Vec<Vec<ArcId>>,
    refs: Vec<u32>,
    done: Vec<bool>,
    members: Vec<BTreeSet<VertexId>>,
    memo: HashMap<BTreeSet<VertexId>, VertexId>,
    created: u32,
}

impl<'a, T: Tracer> Determinizer<'a, T> {
    fn new(sub: &'a mut SubGraph, tracer: &'a mut T) -> Result<Self> {
        sub.sort(Order::ForMin);
        let n = sub.num_vertex();
        let runs = (0..n)
            .map(|v| sub.arcs_from_by_label(v).map(<[ArcId]>::to_vec))
            .collect::<Result<Vec<_>>>()?;

        let mut engine = Self {
            sub,
            tracer,
            runs,
            refs: vec![0; n as usize],
            done: vec![false; n as usize],
            members: (0..n).map(|v| BTreeSet::from([v])).collect(),
            memo: HashMap::new(),
            created: 0,
        };
        if n > 0 {
            let start = engine.sub.start();
            engine.inc(start);
        }
        Ok(engine)
    }

    /// Scan every live vertex until a full scan does nothing.
    fn run(&mut self) -> Result<()> {
        loop {
            let mut progressed = false;
            let mut v = 0;
            // Merged vertices are appended during the scan and visited by it.
            while (v as usize) < self.runs.len() {
                if self.refs[v as usize] > 0 && !self.done[v as usize] {
                    self.done[v as usize] = self.determinize_vertex(v);
                    progressed = true;
                }
                v += 1;
            }
            if !progressed {
                return Ok(());
            }
        }
    }

    /// Collapse same-label arcs leaving `v`. Returns `false` if `v` died
    /// half-way (it belonged to a cycle that lost its last outside reference).
    fn determinize_vertex(&mut self, v: VertexId) -> bool {
        let sub = &*self.sub;
        self.runs[v as usize].retain(|&id| sub.arc(id).is_live());

        let mut i = 0;
        while i + 1 < self.runs[v as usize].len() {
            if self.refs[v as usize] == 0 {
                return false;
            }
            let (e1, e2) = (self.runs[v as usize][i], self.runs[v as usize][i + 1]);
            let (a1, a2) = (*self.sub.arc(e1), *self.sub.arc(e2));
            if a1.labels() != a2.labels() {
                if a1.input == a2.input {
                    self.tracer.trace_output_conflict(v, a1.input);
                }
                i += 1;
                continue;
            }

            match (a1.to, a2.to) {
                (t1, t2) if t1 == t2 => {
                    self.drop_arc(v, i + 1);
                    if let Target::Vertex(d) = t2 {
                        self.dec(d);
                    }
                }
                (Target::Vertex(d1), Target::Vertex(d2)) => {
                    let target = self.union_target(d1, d2);
                    self.tracer.trace_determinize_merge(v, d1, d2, target);
                    self.sub.set_target(e1, Target::Vertex(target));
                    self.drop_arc(v, i + 1);
                    self.inc(target);
                    self.dec(d1);
                    self.dec(d2);
                    self.sort_run(v);
                }
                // Only `Terminal` arcs target `Terminal`, and they share labels
                // with no vertex-targeted arc.
                _ => i += 1,
            }
        }
        true
    }

    fn drop_arc(&mut self, v: VertexId, pos: usize) {
        let id = self.runs[v as usize].remove(pos);
        self.sub.discard(id);
    }

    fn sort_run(&mut self, v: VertexId) {
        let sub = &*self.sub;
        self.runs[v as usize].sort_by_key(|&id| {
            let arc = sub.arc(id);
            (arc.input, arc.output, arc.to)
        });
    }

    /// Vertex standing for the union of `d1` and `d2`.
    fn union_target(&mut self, d1: VertexId, d2: VertexId) -> VertexId {
        let set: BTreeSet<VertexId> = self.members[d1 as usize]
            .union(&self.members[d2 as usize])
            .copied()
            .collect();
        if set == self.members[d1 as usize] {
            return d1;
        }
        if set == self.members[d2 as usize] {
            return d2;
        }
        if let Some(&m) = self.memo.get(&set) {
            return m;
        }
        let m = self.merge_vertices(d1, d2);
        self.members[m as usize] = set.clone();
        self.memo.insert(set, m);
        m
    }

    /// New vertex whose run is the union of the runs of `d1` and `d2`.
    fn merge_vertices(&mut self, d1: VertexId, d2: VertexId) -> VertexId {
        let m = self.sub.new_vertex();
        let mut arcs: Vec<Arc> = self.runs[d1 as usize]
            .iter()
            .chain(&self.runs[d2 as usize])
            .map(|&id| *self.sub.arc(id))
            .filter(Arc::is_live)
            .map(|arc| arc.rehomed(m, arc.to))
            .collect();
        arcs.sort_by_key(|arc| (arc.input, arc.output, arc.to));
        arcs.dedup_by_key(|arc| (arc.input, arc.output, arc.to));

        let run = arcs.into_iter().map(|arc| self.sub.push_arc(arc)).collect();
        self.runs.push(run);
        self.refs.push(0);
        self.done.push(false);
        self.members.push(BTreeSet::new());
        self.created += 1;
        m
    }

    fn live_targets(&self, v: VertexId) -> Vec<VertexId> {
        self.runs[v as usize]
            .iter()
            .map(|&id| self.sub.arc(id))
            .filter(|arc| arc.is_live())
            .filter_map(|arc| arc.to.vertex())
            .collect()
    }

    /// Add one reference to `v`; a vertex coming alive references its targets.
    fn inc(&mut self, v: VertexId) {
        let mut stack = vec![v];
        while let Some(v) = stack.pop() {
            self.refs[v as usize] += 1;
            if self.refs[v as usize] == 1 {
                stack.extend(self.live_targets(v));
            }
        }
    }

    /// Drop one reference to `v`; a vertex dying releases its targets.
    fn dec(&mut self, v: VertexId) {
        let mut stack = vec![v];
        while let Some(v) = stack.pop() {
            debug_assert!(self.refs[v as usize] > 0, "reference count underflow at {v}");
            self.refs[v as usize] = self.refs[v as usize].saturating_sub(1);
            if self.refs[v as usize] == 0 {
                stack.extend(self.live_targets(v));
            }
        }
    }

    /// Recompute every reference count and compare with the cached ones.
    fn consistency_check(&self) -> Result<()> {
        let n = self.runs.len();
        let mut actual = vec![0u32; n];
        if n > 0 {
            actual[self.sub.start() as usize] += 1;
        }
        for v in 0..n as VertexId {
            if self.refs[v as usize] == 0 {
                continue;
            }
            for w in self.live_targets(v) {
                actual[w as usize] += 1;
            }
        }
        for (v, (&cached, &actual)) in self.refs.iter().zip(&actual).enumerate() {
            if cached != actual {
                return Err(Error::InconsistentRefCount {
                    vertex: v as VertexId,
                    cached,
                    actual,
                });
            }
        }
        Ok(())
    }
}
