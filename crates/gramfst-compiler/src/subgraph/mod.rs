//! Per-rule transition sets.
//!
//! A `SubGraph` owns an arena of arcs addressed by [`ArcId`], a monotonically
//! increasing vertex allocator, and a derived [`AdjacencyIndex`]. Arcs are
//! appended, mutated in place, or tombstoned; they are only physically removed
//! by [`compact`](crate::reduce::compact).
//!
//! Every method that touches arcs invalidates the index. Index queries
//! (`arcs_from`, `arcs_to`, ...) must be preceded by a `sort` of the order they
//! read, otherwise they return [`Error::StaleIndex`].

mod scope;


use gramfst_core::{Arc, RuleId, Target, VertexId};

use crate::index::{AdjacencyIndex, Order};
use crate::trace::GraphStats;
use crate::{Error, Result};

pub use scope::ScopeKind;
use scope::ScopeFrame;

/// Index into `SubGraph::arcs`.
pub type ArcId = usize;

/// Build state of a rule body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyState {
    /// Referenced before its definition; no arcs yet.
    Placeholder,
    /// Builder calls accepted.
    Open,
    /// Finished; `end` is the vertex where the body's last scope closed.
    Closed { end: VertexId },
}

/// One rule's (or one flattened grammar's) transition graph.
#[derive(Debug, Clone)]
pub struct SubGraph {
    title: String,
    rule_id: RuleId,
    arcs: Vec<Arc>,
    num_vertex: u32,
    start: VertexId,
    body: BodyState,
    scopes: Vec<ScopeFrame>,
    index: AdjacencyIndex,
}

impl SubGraph {
    /// Forward-declared rule: known id, empty arc set.
    pub fn placeholder(rule_id: RuleId, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rule_id,
            arcs: Vec::new(),
            num_vertex: 0,
            start: 0,
            body: BodyState::Placeholder,
            scopes: Vec::new(),
            index: AdjacencyIndex::default(),
        }
    }

    /// Open body ready for builder calls, with the start vertex allocated.
    pub fn new(rule_id: RuleId, title: impl Into<String>) -> Self {
        let mut graph = Self::placeholder(rule_id, title);
        graph.open();
        graph
    }

    /// Turn a placeholder into an open body.
    pub(crate) fn open(&mut self) {
        debug_assert!(self.body == BodyState::Placeholder);
        self.start = self.new_vertex();
        self.scopes.push(ScopeFrame::root(self.start));
        self.body = BodyState::Open;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    pub fn rule_id(&self) -> RuleId {
        self.rule_id
    }

    pub fn body(&self) -> BodyState {
        self.body
    }

    pub fn is_placeholder(&self) -> bool {
        self.body == BodyState::Placeholder
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    /// End vertex of a finished body.
    pub fn end(&self) -> Option<VertexId> {
        match self.body {
            BodyState::Closed { end } => Some(end),
            _ => None,
        }
    }

    /// Number of allocated vertex ids; every live arc endpoint is below it.
    pub fn num_vertex(&self) -> u32 {
        self.num_vertex
    }

    /// All arcs, tombstones included.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn arc(&self, id: ArcId) -> &Arc {
        &self.arcs[id]
    }

    /// Live arcs with their ids, in arena order.
    pub fn live_arcs(&self) -> impl Iterator<Item = (ArcId, &Arc)> {
        self.arcs.iter().enumerate().filter(|(_, a)| a.is_live())
    }

    pub fn live_arc_count(&self) -> usize {
        self.arcs.iter().filter(|a| a.is_live()).count()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertices: self.num_vertex,
            arcs: self.live_arc_count(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────

    /// Allocate the next vertex id.
    pub fn new_vertex(&mut self) -> VertexId {
        let id = self.num_vertex;
        self.num_vertex += 1;
        id
    }

    /// Reserve `count` consecutive vertex ids, returning the first.
    pub(crate) fn reserve_vertices(&mut self, count: u32) -> VertexId {
        let first = self.num_vertex;
        self.num_vertex += count;
        first
    }

    pub fn push_arc(&mut self, arc: Arc) -> ArcId {
        self.index.invalidate();
        self.arcs.push(arc);
        self.arcs.len() - 1
    }

    /// Add an epsilon arc unless it would be a self-loop.
    pub(crate) fn push_epsilon(&mut self, from: VertexId, to: VertexId) {
        if from != to {
            self.push_arc(Arc::epsilon(from, to));
        }
    }

    /// Tombstone an arc.
    pub fn discard(&mut self, id: ArcId) {
        self.index.invalidate();
        self.arcs[id].discard();
    }

    /// Mutate one arc in place.
    pub fn update_arc(&mut self, id: ArcId, f: impl FnOnce(&mut Arc)) {
        self.index.invalidate();
        f(&mut self.arcs[id]);
    }

    pub fn set_target(&mut self, id: ArcId, to: Target) {
        self.update_arc(id, |arc| arc.to = to);
    }

    pub(crate) fn set_body(&mut self, body: BodyState) {
        self.body = body;
    }

    pub(crate) fn set_start(&mut self, start: VertexId) {
        self.start = start;
    }

    /// Replace the arc set and vertex count wholesale (renumbering).
    pub(crate) fn replace_arcs(&mut self, arcs: Vec<Arc>, num_vertex: u32) {
        self.index.invalidate();
        self.arcs = arcs;
        self.num_vertex = num_vertex;
    }

    /// Refresh the vertex counter from the largest vertex id in use.
    pub fn update_vertex_count(&mut self) {
        let max = self
            .live_arcs()
            .flat_map(|(_, a)| std::iter::once(a.from).chain(a.to.vertex()))
            .chain(std::iter::once(self.start))
            .max()
            .unwrap_or(0);
        self.num_vertex = max + 1;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Index
    // ─────────────────────────────────────────────────────────────────────

    /// Recompute one adjacency order from the current arcs.
    pub fn sort(&mut self, order: Order) {
        self.index.rebuild(&self.arcs, order);
    }

    pub fn is_sorted(&self, order: Order) -> bool {
        self.index.is_fresh(order)
    }

    /// Whole permutation of `order`, live arcs first.
    pub fn ordered(&self, order: Order) -> Result<&[ArcId]> {
        self.index.ordered(order)
    }

    /// Permutation position of the first arc leaving `v` (forward order).
    pub fn first_from(&self, v: VertexId) -> Result<Option<usize>> {
        self.index.first(&self.arcs, Order::Forward, v)
    }

    /// Permutation position of the first arc entering `v` (backward order).
    pub fn first_to(&self, v: VertexId) -> Result<Option<usize>> {
        self.index.first(&self.arcs, Order::Backward, v)
    }

    /// Live arcs leaving `v`, sorted by `(to, input, output)`.
    pub fn arcs_from(&self, v: VertexId) -> Result<&[ArcId]> {
        self.index.run(&self.arcs, Order::Forward, v)
    }

    /// Live arcs entering `v`, sorted by `(from, input, output)`.
    pub fn arcs_to(&self, v: VertexId) -> Result<&[ArcId]> {
        self.index.run(&self.arcs, Order::Backward, v)
    }

    /// Live arcs leaving `v`, sorted by `(input, output, to)`.
    pub fn arcs_from_by_label(&self, v: VertexId) -> Result<&[ArcId]> {
        self.index.run(&self.arcs, Order::ForMin, v)
    }

    /// Check that every live arc endpoint is below `num_vertex`.
    pub fn check_vertex_bounds(&self) -> Result<()> {
        for (id, arc) in self.live_arcs() {
            for vertex in std::iter::once(arc.from).chain(arc.to.vertex()) {
                if vertex >= self.num_vertex {
                    return Err(Error::VertexOutOfBounds {
                        arc: id,
                        vertex,
                        num_vertex: self.num_vertex,
                    });
                }
            }
        }
        Ok(())
    }
}
