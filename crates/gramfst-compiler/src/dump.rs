//! Dump helpers for graph inspection and testing.
//!
//! Arcs are printed one per line in forward order:
//!
//! ```text
//! start: 0
//! 0 -> 1: hello
//! 1 -> 2: <tag>/greeting
//! 2 -> end: <end>
//! ```
//!
//! The output label is shown after `/` unless it is epsilon.

use std::fmt::Write;

use serde::Serialize;

use gramfst_core::{Arc, Colors, Interner, Label, Target, VertexId};

use crate::subgraph::SubGraph;

/// Resolves symbols and rule ids to names. Unresolved ids print raw.
#[derive(Clone, Copy, Default)]
pub struct LabelNames<'a> {
    interner: Option<&'a Interner>,
    rules: &'a [String],
}

impl<'a> LabelNames<'a> {
    pub fn new(interner: &'a Interner, rules: &'a [String]) -> Self {
        Self {
            interner: Some(interner),
            rules,
        }
    }

    pub fn render(&self, label: Label) -> String {
        match label {
            Label::Symbol(sym) => match self.interner.and_then(|i| i.try_resolve(sym)) {
                Some(name) => name.to_owned(),
                None => label.to_string(),
            },
            Label::Rule(rule) => match self.rules.get(rule.get() as usize) {
                Some(name) => format!("@{name}"),
                None => label.to_string(),
            },
            sentinel => sentinel.to_string(),
        }
    }
}

/// Printer for a `SubGraph`.
pub struct GraphPrinter<'a> {
    sub: &'a SubGraph,
    names: LabelNames<'a>,
    colors: Colors,
}

impl<'a> GraphPrinter<'a> {
    pub fn new(sub: &'a SubGraph) -> Self {
        Self {
            sub,
            names: LabelNames::default(),
            colors: Colors::OFF,
        }
    }

    pub fn with_names(mut self, names: LabelNames<'a>) -> Self {
        self.names = names;
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        let c = &self.colors;
        writeln!(w, "start: {}{}{}", c.blue, self.sub.start(), c.reset)?;
        for arc in forward_order(self.sub) {
            write!(w, "{}{}{} -> ", c.blue, arc.from, c.reset)?;
            match arc.to {
                Target::Vertex(v) => write!(w, "{}{v}{}", c.blue, c.reset)?,
                _ => write!(w, "{}end{}", c.green, c.reset)?,
            }
            write!(w, ": ")?;
            self.format_label(w, arc.input)?;
            if !arc.output.is_epsilon() {
                write!(w, "/")?;
                self.format_label(w, arc.output)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    fn format_label(&self, w: &mut String, label: Label) -> std::fmt::Result {
        let c = &self.colors;
        let color = if label.is_sentinel() { c.dim } else { c.green };
        write!(w, "{color}{}{}", self.names.render(label), c.reset)
    }
}

/// Live arcs sorted by `(from, to, input, output)`.
fn forward_order(sub: &SubGraph) -> Vec<&Arc> {
    let mut arcs: Vec<&Arc> = sub.live_arcs().map(|(_, arc)| arc).collect();
    arcs.sort_by_key(|arc| (arc.from, arc.to, arc.input, arc.output));
    arcs
}

/// Serializable view of a compiled graph with labels rendered to names.
#[derive(Debug, Serialize)]
pub struct GraphJson {
    pub title: String,
    pub start: VertexId,
    pub vertices: u32,
    pub arcs: Vec<ArcJson>,
}

#[derive(Debug, Serialize)]
pub struct ArcJson {
    pub from: VertexId,
    /// `None` for accepting arcs.
    pub to: Option<VertexId>,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl GraphJson {
    pub fn new(sub: &SubGraph, names: LabelNames<'_>) -> Self {
        let arcs = forward_order(sub)
            .into_iter()
            .map(|arc| ArcJson {
                from: arc.from,
                to: arc.to.vertex(),
                input: names.render(arc.input),
                output: (!arc.output.is_epsilon()).then(|| names.render(arc.output)),
            })
            .collect();
        Self {
            title: sub.title().to_owned(),
            start: sub.start(),
            vertices: sub.num_vertex(),
            arcs,
        }
    }
}
