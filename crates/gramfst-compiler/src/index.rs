//! Sorted adjacency permutations.
//!
//! Arcs never move; each order is a permutation of arc indices sorted by a
//! key, answering "first arc for vertex" by binary search. Tombstoned arcs
//! sort after every live arc and are never reported.
//!
//! A permutation is only valid for the arc set it was built from. Any arc
//! mutation flips every permutation to [`Permutation::Stale`], and queries on
//! stale permutations fail with [`Error::StaleIndex`].

use std::cmp::Ordering;
use std::fmt;

use gramfst_core::{Arc, Target, VertexId};

use crate::subgraph::ArcId;
use crate::{Error, Result};

/// Sort order of a permutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// `(from, to, input, output)`
    Forward,
    /// `(to, from, input, output)`
    Backward,
    /// `(from, input, output, to)`: arcs sharing an input label are
    /// contiguous per source vertex.
    ForMin,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Forward => write!(f, "forward"),
            Order::Backward => write!(f, "backward"),
            Order::ForMin => write!(f, "for-min"),
        }
    }
}

impl Order {
    fn compare(self, a: &Arc, b: &Arc) -> Ordering {
        match self {
            Order::Forward => (a.to.is_discarded(), a.from, a.to, a.input, a.output).cmp(&(
                b.to.is_discarded(),
                b.from,
                b.to,
                b.input,
                b.output,
            )),
            Order::Backward => {
                (a.to, a.from, a.input, a.output).cmp(&(b.to, b.from, b.input, b.output))
            }
            Order::ForMin => (a.to.is_discarded(), a.from, a.input, a.output, a.to).cmp(&(
                b.to.is_discarded(),
                b.from,
                b.input,
                b.output,
                b.to,
            )),
        }
    }

    /// Whether `arc` sorts strictly before the run of vertex `v`.
    fn before(self, arc: &Arc, v: VertexId) -> bool {
        match self {
            Order::Forward | Order::ForMin => arc.is_live() && arc.from < v,
            Order::Backward => arc.to < Target::Vertex(v),
        }
    }

    /// Whether `arc` sorts at or before the run of vertex `v`.
    fn up_to(self, arc: &Arc, v: VertexId) -> bool {
        match self {
            Order::Forward | Order::ForMin => arc.is_live() && arc.from <= v,
            Order::Backward => arc.to <= Target::Vertex(v),
        }
    }
}

/// Sorted arc permutation, valid or invalidated.
#[derive(Debug, Clone, Default)]
pub enum Permutation {
    #[default]
    Stale,
    Fresh(Vec<ArcId>),
}

impl Permutation {
    fn get(&self, order: Order) -> Result<&[ArcId]> {
        match self {
            Permutation::Fresh(perm) => Ok(perm),
            Permutation::Stale => Err(Error::StaleIndex { order }),
        }
    }
}

/// The three derived orders of a subgraph's arcs.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    forward: Permutation,
    backward: Permutation,
    for_min: Permutation,
}

impl AdjacencyIndex {
    fn slot(&self, order: Order) -> &Permutation {
        match order {
            Order::Forward => &self.forward,
            Order::Backward => &self.backward,
            Order::ForMin => &self.for_min,
        }
    }

    fn slot_mut(&mut self, order: Order) -> &mut Permutation {
        match order {
            Order::Forward => &mut self.forward,
            Order::Backward => &mut self.backward,
            Order::ForMin => &mut self.for_min,
        }
    }

    /// Mark every order stale.
    pub fn invalidate(&mut self) {
        self.forward = Permutation::Stale;
        self.backward = Permutation::Stale;
        self.for_min = Permutation::Stale;
    }

    pub fn is_fresh(&self, order: Order) -> bool {
        matches!(self.slot(order), Permutation::Fresh(_))
    }

    /// Recompute one order from the current arcs. Equal keys keep arc order.
    pub fn rebuild(&mut self, arcs: &[Arc], order: Order) {
        let mut perm: Vec<ArcId> = (0..arcs.len()).collect();
        perm.sort_by(|&a, &b| order.compare(&arcs[a], &arcs[b]).then(a.cmp(&b)));
        *self.slot_mut(order) = Permutation::Fresh(perm);
    }

    /// The whole permutation, live arcs first.
    pub fn ordered(&self, order: Order) -> Result<&[ArcId]> {
        self.slot(order).get(order)
    }

    /// Position in the permutation of the first arc keyed on `v`.
    pub fn first(&self, arcs: &[Arc], order: Order, v: VertexId) -> Result<Option<usize>> {
        let perm = self.slot(order).get(order)?;
        let pos = perm.partition_point(|&a| order.before(&arcs[a], v));
        let found = perm.get(pos).is_some_and(|&a| {
            let arc = &arcs[a];
            match order {
                Order::Forward | Order::ForMin => arc.is_live() && arc.from == v,
                Order::Backward => arc.to == Target::Vertex(v),
            }
        });
        Ok(found.then_some(pos))
    }

    /// Contiguous run of arcs keyed on `v`.
    pub fn run(&self, arcs: &[Arc], order: Order, v: VertexId) -> Result<&[ArcId]> {
        let perm = self.slot(order).get(order)?;
        let start = perm.partition_point(|&a| order.before(&arcs[a], v));
        let end = perm.partition_point(|&a| order.up_to(&arcs[a], v));
        Ok(&perm[start..end])
    }
}
