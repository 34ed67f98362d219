//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Arc, Target, VertexId};

impl Target {
    /// Destination vertex of an arc already known not to be terminal or discarded.
    pub fn ensure_vertex(self) -> VertexId {
        self.vertex().unwrap_or_else(|| {
            panic!("Target: expected a vertex destination, found {self:?} (callers must filter sentinels)")
        })
    }
}

impl Arc {
    /// Destination vertex of a live, non-terminal arc.
    pub fn ensure_to_vertex(&self) -> VertexId {
        self.to.ensure_vertex()
    }
}
