//! Pass instrumentation.
//!
//! Passes report what they do through a [`Tracer`]. With [`NoopTracer`]
//! every call is an `#[inline(always)]` empty function and disappears;
//! [`PrintTracer`] formats the events into lines filtered by [`Verbosity`].
//!
//! Tracers receive raw ids only. Formatting happens in the tracer.

use std::fmt;

use gramfst_core::{Colors, Label, RuleId, VertexId};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Warnings only.
    Quiet,
    /// Pass summaries and warnings.
    #[default]
    Default,
    /// (-v) plus rule expansions and equivalence merges.
    Verbose,
    /// (-vv) plus every determinization merge.
    VeryVerbose,
}

/// Pipeline pass reported by `trace_pass_begin` / `trace_pass_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Expand,
    Silence,
    RemoveBrackets,
    Prune,
    Dedup,
    Compact,
    Minimize,
    Determinize,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pass::Expand => "expand",
            Pass::Silence => "silence",
            Pass::RemoveBrackets => "remove-brackets",
            Pass::Prune => "prune",
            Pass::Dedup => "dedup",
            Pass::Compact => "compact",
            Pass::Minimize => "minimize",
            Pass::Determinize => "determinize",
        };
        f.write_str(name)
    }
}

/// Size of a subgraph at a point in the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub vertices: u32,
    /// Live arcs only.
    pub arcs: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vertices, {} arcs", self.vertices, self.arcs)
    }
}

/// Compiler pass instrumentation.
pub trait Tracer {
    /// Called before a pass touches the graph.
    fn trace_pass_begin(&mut self, pass: Pass, stats: GraphStats);

    /// Called after a pass finished.
    fn trace_pass_end(&mut self, pass: Pass, stats: GraphStats);

    /// Called after a rule body was inlined at a call site.
    fn trace_rule_expanded(&mut self, rule: RuleId, arcs: usize);

    /// Called when minimization maps `merged` onto `kept`.
    fn trace_equivalence_merge(&mut self, kept: VertexId, merged: VertexId);

    /// Called when minimization hit its iteration cap with merges pending.
    fn trace_not_converged(&mut self, iterations: u32);

    /// Called when determinization redirects two same-label arcs of `vertex`
    /// (to `a` and `b`) onto `target`.
    fn trace_determinize_merge(
        &mut self,
        vertex: VertexId,
        a: VertexId,
        b: VertexId,
        target: VertexId,
    );

    /// Called when `vertex` has arcs sharing `input` with different outputs.
    fn trace_output_conflict(&mut self, vertex: VertexId, input: Label);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_pass_begin(&mut self, _pass: Pass, _stats: GraphStats) {}

    #[inline(always)]
    fn trace_pass_end(&mut self, _pass: Pass, _stats: GraphStats) {}

    #[inline(always)]
    fn trace_rule_expanded(&mut self, _rule: RuleId, _arcs: usize) {}

    #[inline(always)]
    fn trace_equivalence_merge(&mut self, _kept: VertexId, _merged: VertexId) {}

    #[inline(always)]
    fn trace_not_converged(&mut self, _iterations: u32) {}

    #[inline(always)]
    fn trace_determinize_merge(
        &mut self,
        _vertex: VertexId,
        _a: VertexId,
        _b: VertexId,
        _target: VertexId,
    ) {
    }

    #[inline(always)]
    fn trace_output_conflict(&mut self, _vertex: VertexId, _input: Label) {}
}

/// Tracer that collects formatted lines.
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Stats at `trace_pass_begin`, consumed by the matching end.
    pending: Vec<(Pass, GraphStats)>,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            pending: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn enabled(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }

    fn add_subline(&mut self, content: String) {
        let c = self.colors;
        self.lines.push(format!("  {}{content}{}", c.dim, c.reset));
    }
}

impl Tracer for PrintTracer {
    fn trace_pass_begin(&mut self, pass: Pass, stats: GraphStats) {
        self.pending.push((pass, stats));
    }

    fn trace_pass_end(&mut self, pass: Pass, stats: GraphStats) {
        let before = match self.pending.pop() {
            Some((begun, before)) if begun == pass => before,
            _ => stats,
        };
        if !self.enabled(Verbosity::Default) {
            return;
        }
        let c = self.colors;
        self.lines.push(format!(
            "{}{pass}{}: {} vertices / {} arcs -> {} vertices / {} arcs",
            c.blue, c.reset, before.vertices, before.arcs, stats.vertices, stats.arcs
        ));
    }

    fn trace_rule_expanded(&mut self, rule: RuleId, arcs: usize) {
        if self.enabled(Verbosity::Verbose) {
            self.add_subline(format!("expand {rule} (+{arcs} arcs)"));
        }
    }

    fn trace_equivalence_merge(&mut self, kept: VertexId, merged: VertexId) {
        if self.enabled(Verbosity::Verbose) {
            self.add_subline(format!("merge {merged} into {kept}"));
        }
    }

    fn trace_not_converged(&mut self, iterations: u32) {
        self.lines.push(format!(
            "warning: minimization did not converge after {iterations} iterations"
        ));
    }

    fn trace_determinize_merge(
        &mut self,
        vertex: VertexId,
        a: VertexId,
        b: VertexId,
        target: VertexId,
    ) {
        if self.enabled(Verbosity::VeryVerbose) {
            self.add_subline(format!("at {vertex}: {a} + {b} -> {target}"));
        }
    }

    fn trace_output_conflict(&mut self, vertex: VertexId, input: Label) {
        self.lines.push(format!(
            "warning: vertex {vertex} has different outputs for input {input}"
        ));
    }
}
