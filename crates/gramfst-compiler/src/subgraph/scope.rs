//! Scoped builder protocol.
//!
//! Every grammar construct is lowered to plain arcs: sequences advance a
//! running tail vertex, alternatives fan out of one vertex and back into
//! another, counted and unbounded repeats physically replicate the scope's
//! block, and every closed scope is bracketed into its parent:
//!
//! ```text
//! parent.last ─<scope→ child.start ··· child close ─scope>→ parent continuation
//! ```
//!
//! A scope's block is contiguous: arcs from `arc_mark` to the end of the
//! arena, vertices from `start` to the allocator. Replica `k` of the block is
//! the same arcs with every vertex shifted by `k * stride`.

use gramfst_core::{Arc, Label, RuleId, VertexId};

use super::{BodyState, SubGraph};
use crate::{Error, Result};

/// Grammar construct opened by `begin_scope`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// Plain sequence.
    Item,
    /// Rule reference wrapper; the end bracket carries the rule id.
    Rule(RuleId),
    /// Alternatives between a shared start and end vertex.
    OneOf,
    /// Between `min` and `max` repetitions.
    Count { min: u32, max: u32 },
    /// At least `min` repetitions.
    Repeat { min: u32 },
    /// Zero or one occurrence.
    Optional,
}

#[derive(Clone, Copy, Debug)]
pub(super) struct ScopeFrame {
    /// `None` for the rule's root frame.
    kind: Option<ScopeKind>,
    start: VertexId,
    /// Fan-in vertex of `OneOf` scopes.
    end: Option<VertexId>,
    /// Running tail of sequential scopes.
    last: VertexId,
    arc_mark: usize,
}

impl ScopeFrame {
    pub(super) fn root(start: VertexId) -> Self {
        Self {
            kind: None,
            start,
            end: None,
            last: start,
            arc_mark: 0,
        }
    }

    fn is_one_of(&self) -> bool {
        self.kind == Some(ScopeKind::OneOf)
    }
}

impl SubGraph {
    fn ensure_open(&self) -> Result<()> {
        match self.body {
            BodyState::Open => Ok(()),
            _ => Err(Error::RuleNotOpen { rule: self.rule_id }),
        }
    }

    fn current_scope(&mut self) -> &mut ScopeFrame {
        self.scopes
            .last_mut()
            .unwrap_or_else(|| unreachable!("open bodies always keep their root frame"))
    }

    /// Open a nested scope.
    pub fn begin_scope(&mut self, kind: ScopeKind) -> Result<()> {
        self.ensure_open()?;
        if let ScopeKind::Count { min, max } = kind
            && (max == 0 || min > max)
        {
            return Err(Error::InvalidRange { min, max });
        }

        let start = self.new_vertex();
        let end = (kind == ScopeKind::OneOf).then(|| self.new_vertex());
        self.scopes.push(ScopeFrame {
            kind: Some(kind),
            start,
            end,
            last: start,
            arc_mark: self.arcs.len(),
        });
        Ok(())
    }

    /// Add a transition in the current scope.
    ///
    /// Sequential scopes advance their tail; `OneOf` adds a parallel
    /// alternative between its start and end.
    pub fn add_item(&mut self, input: Label, output: Label) -> Result<()> {
        self.ensure_open()?;
        let scope = *self.current_scope();
        match scope.end {
            Some(end) if scope.is_one_of() => {
                self.push_arc(Arc::new(scope.start, end, input, output));
            }
            _ => {
                let next = self.new_vertex();
                self.push_arc(Arc::new(scope.last, next, input, output));
                self.current_scope().last = next;
            }
        }
        Ok(())
    }

    /// Add a tag transition carrying `tag` on its output side.
    pub fn add_tag(&mut self, tag: Label) -> Result<()> {
        self.add_item(Label::Tag, tag)
    }

    /// Add a deferred call to `rule`, bracketed like any other scope.
    pub fn add_rule_ref(&mut self, rule: RuleId) -> Result<()> {
        self.begin_scope(ScopeKind::Rule(rule))?;
        self.add_item(Label::Rule(rule), Label::Epsilon)?;
        self.end_scope()
    }

    /// Close the current scope and splice it into its parent.
    pub fn end_scope(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.scopes.len() < 2 {
            return Err(Error::ScopeUnderflow);
        }
        let Some(frame) = self.scopes.pop() else {
            return Err(Error::ScopeUnderflow);
        };
        let Some(kind) = frame.kind else {
            return Err(Error::ScopeUnderflow);
        };

        let close = match kind {
            ScopeKind::Item | ScopeKind::Rule(_) => frame.last,
            ScopeKind::OneOf => frame.end.unwrap_or(frame.last),
            ScopeKind::Optional => {
                self.push_epsilon(frame.start, frame.last);
                frame.last
            }
            ScopeKind::Count { min, max } => self.close_count(&frame, min, max),
            ScopeKind::Repeat { min } => self.close_repeat(&frame, min),
        };

        let (begin, end_label, end_output) = match kind {
            ScopeKind::Rule(rule) => (Label::BeginRule, Label::EndRule, Label::Rule(rule)),
            _ => (Label::BeginScope, Label::EndScope, Label::Epsilon),
        };

        let parent = *self.current_scope();
        let attach = if parent.is_one_of() {
            parent.start
        } else {
            parent.last
        };
        self.push_arc(Arc::new(attach, frame.start, begin, Label::Epsilon));

        let resume = match parent.end {
            Some(end) if parent.is_one_of() => end,
            _ => {
                let next = self.new_vertex();
                self.current_scope().last = next;
                next
            }
        };
        self.push_arc(Arc::new(close, resume, end_label, end_output));
        Ok(())
    }

    /// Finish the rule body. Only the root frame may remain open.
    pub fn finish(&mut self) -> Result<VertexId> {
        self.ensure_open()?;
        if self.scopes.len() != 1 {
            return Err(Error::UnbalancedScope {
                rule: self.rule_id,
                open: self.scopes.len().saturating_sub(1),
            });
        }
        let end = self.current_scope().last;
        self.scopes.clear();
        self.body = BodyState::Closed { end };
        Ok(end)
    }

    /// Depth of open scopes below the root frame.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len().saturating_sub(1)
    }

    /// Lay `copies` replicas of the frame's block end to end, chained with
    /// epsilons. Returns the `(head, tail)` of each replica; replica 0 is the
    /// original block.
    fn replicate(&mut self, frame: &ScopeFrame, copies: u32) -> Vec<(VertexId, VertexId)> {
        let head = frame.start;
        let tail = frame.last;
        let stride = self.num_vertex - head;
        let block: Vec<Arc> = self.arcs[frame.arc_mark..]
            .iter()
            .filter(|a| a.is_live())
            .copied()
            .collect();

        let mut replicas = Vec::with_capacity(copies as usize);
        replicas.push((head, tail));
        for k in 1..copies {
            let offset = self.reserve_vertices(stride) - head;
            debug_assert_eq!(offset, k * stride);
            for arc in &block {
                self.push_arc(arc.map_vertices(|v| v + offset));
            }
            let (_, prev_tail) = replicas[(k - 1) as usize];
            self.push_epsilon(prev_tail, head + offset);
            replicas.push((head + offset, tail + offset));
        }
        replicas
    }

    fn close_count(&mut self, frame: &ScopeFrame, min: u32, max: u32) -> VertexId {
        let replicas = self.replicate(frame, max);
        let end = self.new_vertex();
        for done in min..max {
            // Leave after `done` repetitions.
            let from = match done {
                0 => frame.start,
                n => replicas[(n - 1) as usize].1,
            };
            self.push_epsilon(from, end);
        }
        let (_, last_tail) = replicas[replicas.len() - 1];
        self.push_epsilon(last_tail, end);
        end
    }

    fn close_repeat(&mut self, frame: &ScopeFrame, min: u32) -> VertexId {
        let copies = min.max(1) + u32::from(min > 0);
        let replicas = self.replicate(frame, copies);
        let (loop_head, loop_tail) = replicas[replicas.len() - 1];
        self.push_epsilon(loop_tail, loop_head);

        let end = self.new_vertex();
        let exact = match min {
            0 => frame.start,
            n => replicas[(n - 1) as usize].1,
        };
        self.push_epsilon(exact, end);
        self.push_epsilon(loop_tail, end);
        end
    }
}
