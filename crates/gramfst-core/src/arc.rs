//! Arc record.
//!
//! Arcs reference vertices by id only. The destination may be a sentinel:
//! [`Target::Terminal`] for accepting transitions, [`Target::Discard`] for
//! tombstoned arcs awaiting compaction.

use serde::{Deserialize, Serialize};

use crate::Label;

/// Dense vertex handle.
pub type VertexId = u32;

/// Arc destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Vertex(VertexId),
    Terminal,
    Discard,
}

impl Target {
    #[inline]
    pub fn vertex(self) -> Option<VertexId> {
        match self {
            Target::Vertex(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == Target::Terminal
    }

    #[inline]
    pub fn is_discarded(self) -> bool {
        self == Target::Discard
    }
}

/// Phonetic context, filled in by phoneme expansion. The graph core only
/// copies it along with the arc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneContext {
    pub centre: Label,
    pub left: Label,
    pub right: Label,
}

/// Directed labeled transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arc {
    pub input: Label,
    pub output: Label,
    pub from: VertexId,
    pub to: Target,
    #[serde(skip_serializing_if = "is_default_context", default)]
    pub context: PhoneContext,
}

fn is_default_context(context: &PhoneContext) -> bool {
    *context == PhoneContext::default()
}

impl Arc {
    pub fn new(from: VertexId, to: VertexId, input: Label, output: Label) -> Self {
        Self {
            input,
            output,
            from,
            to: Target::Vertex(to),
            context: PhoneContext::default(),
        }
    }

    pub fn epsilon(from: VertexId, to: VertexId) -> Self {
        Self::new(from, to, Label::Epsilon, Label::Epsilon)
    }

    /// Accepting transition out of `from`.
    pub fn terminal(from: VertexId) -> Self {
        Self {
            input: Label::Terminal,
            output: Label::Epsilon,
            from,
            to: Target::Terminal,
            context: PhoneContext::default(),
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        !self.to.is_discarded()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.to.is_terminal()
    }

    /// Tombstone this arc. Compaction drops it later.
    #[inline]
    pub fn discard(&mut self) {
        self.to = Target::Discard;
    }

    /// `(input, output)` pair: the arc's label identity.
    #[inline]
    pub fn labels(&self) -> (Label, Label) {
        (self.input, self.output)
    }

    /// Same labels and context, different endpoints.
    pub fn rehomed(&self, from: VertexId, to: Target) -> Self {
        Self { from, to, ..*self }
    }

    /// Apply `map` to every vertex endpoint, leaving sentinels alone.
    pub fn map_vertices(&self, mut map: impl FnMut(VertexId) -> VertexId) -> Self {
        let to = match self.to {
            Target::Vertex(v) => Target::Vertex(map(v)),
            other => other,
        };
        Self {
            from: map(self.from),
            to,
            ..*self
        }
    }
}
