//! Rule registry and rule inlining.
//!
//! Rules are keyed by [`RuleId`] in definition order. A reference to a rule
//! that is not defined yet creates a placeholder entry; the later definition
//! fills it in. [`Graph::expand_rules`] flattens the root rule into one
//! [`SubGraph`] by replacing every `Rule(r)` call arc with a copy of `r`'s body.

use indexmap::IndexMap;

use gramfst_core::{Arc, Label, RuleId, VertexId};

use crate::subgraph::{ArcId, BodyState, SubGraph};
use crate::trace::{Pass, Tracer};
use crate::{Error, Result};

/// Registry of rule bodies.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    rules: IndexMap<RuleId, SubGraph>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `rule` has an entry, creating a placeholder if needed.
    pub fn declare(&mut self, rule: RuleId, title: &str) -> &mut SubGraph {
        self.rules
            .entry(rule)
            .or_insert_with(|| SubGraph::placeholder(rule, title))
    }

    /// Open the body of `rule` for builder calls.
    pub fn begin_rule(&mut self, rule: RuleId, title: &str) -> Result<&mut SubGraph> {
        let sub = self.declare(rule, title);
        if !sub.is_placeholder() {
            return Err(Error::DuplicateRule { rule });
        }
        sub.set_title(title);
        sub.open();
        Ok(sub)
    }

    /// Finish the body of `rule`, returning its end vertex.
    pub fn end_rule(&mut self, rule: RuleId) -> Result<VertexId> {
        self.rules
            .get_mut(&rule)
            .ok_or(Error::UndefinedRule { rule })?
            .finish()
    }

    /// Emit a call to `target` inside the open body of `host`.
    pub fn add_rule_ref(&mut self, host: RuleId, target: RuleId) -> Result<()> {
        if !self.rules.contains_key(&target) {
            self.declare(target, &target.to_string());
        }
        self.rules
            .get_mut(&host)
            .ok_or(Error::RuleNotOpen { rule: host })?
            .add_rule_ref(target)
    }

    pub fn rule(&self, rule: RuleId) -> Option<&SubGraph> {
        self.rules.get(&rule)
    }

    pub fn rule_mut(&mut self, rule: RuleId) -> Option<&mut SubGraph> {
        self.rules.get_mut(&rule)
    }

    /// Rules in definition (or first reference) order.
    pub fn rules(&self) -> impl Iterator<Item = &SubGraph> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules referenced somewhere but never finished.
    pub fn undefined_rules(&self) -> Vec<RuleId> {
        self.rules
            .values()
            .filter(|sub| !matches!(sub.body(), BodyState::Closed { .. }))
            .map(SubGraph::rule_id)
            .collect()
    }

    fn closed_body(&self, rule: RuleId) -> Result<&SubGraph> {
        match self.rules.get(&rule) {
            Some(sub) if sub.end().is_some() => Ok(sub),
            _ => Err(Error::UndefinedRule { rule }),
        }
    }

    /// Flatten `root` and everything it references into one subgraph with a
    /// single `Terminal` arc.
    ///
    /// The result still carries every scope and rule bracket; reduction
    /// removes them. At most `fuel` calls are expanded.
    pub fn expand_rules(
        &self,
        root: RuleId,
        fuel: u32,
        tracer: &mut impl Tracer,
    ) -> Result<SubGraph> {
        let title = self
            .rules
            .get(&root)
            .map_or_else(|| root.to_string(), |sub| sub.title().to_owned());
        let mut flat = SubGraph::new(root, title);
        flat.add_rule_ref(root)?;
        let end = flat.finish()?;
        tracer.trace_pass_begin(Pass::Expand, flat.stats());

        let mut expansions = 0u32;
        // The arena grows while we walk it: inlined bodies are scanned too.
        let mut cursor = 0;
        while cursor < flat.arcs().len() {
            let call = *flat.arc(cursor);
            if let Label::Rule(rule) = call.input
                && call.is_live()
            {
                if expansions >= fuel {
                    return Err(Error::ExpansionLimitExceeded { expansions });
                }
                expansions += 1;
                let body = self.closed_body(rule)?;
                let added = inline_body(&mut flat, cursor, body);
                tracer.trace_rule_expanded(rule, added);
            }
            cursor += 1;
        }

        flat.update_vertex_count();
        flat.push_arc(Arc::terminal(end));
        tracer.trace_pass_end(Pass::Expand, flat.stats());
        Ok(flat)
    }
}

/// Replace call arc `call_id` in `host` with a copy of `body`, returning the
/// number of arcs added.
fn inline_body(host: &mut SubGraph, call_id: ArcId, body: &SubGraph) -> usize {
    let call = *host.arc(call_id);
    let from = call.from;
    let to = call.ensure_to_vertex();
    let start = body.start();
    let end = body.end().unwrap_or(start);
    let offset = host.reserve_vertices(body.num_vertex());
    let map = |v: VertexId| {
        if v == start {
            from
        } else if v == end {
            to
        } else {
            v + offset
        }
    };

    let before = host.arcs().len();
    if start == end {
        host.push_epsilon(from, to);
    }
    for (_, arc) in body.live_arcs() {
        host.push_arc(arc.map_vertices(map));
    }
    host.discard(call_id);
    host.arcs().len() - before
}
