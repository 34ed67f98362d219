//! The `Compiler` facade.
//!
//! Stage order:
//! expand → (silence) → reduce → minimize → determinize → reduce → minimize.
//! `compile_to` stops after the requested [`Stage`].

use std::fmt;
use std::str::FromStr;

use gramfst_core::RuleId;

use crate::determinize::determinize;
use crate::graph::Graph;
use crate::minimize::minimize;
use crate::options::CompileOptions;
use crate::reduce::reduce;
use crate::silence::add_silence;
use crate::subgraph::SubGraph;
use crate::trace::{Pass, Tracer};
use crate::verify;
use crate::Result;

/// Point at which `compile_to` returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Root rule inlined, brackets still present.
    Expanded,
    /// Brackets removed, pruned, deduplicated, compacted.
    Reduced,
    /// Equivalent vertices merged.
    Minimized,
    /// Deterministic, then reduced and minimized again.
    Determinized,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Expanded,
        Stage::Reduced,
        Stage::Minimized,
        Stage::Determinized,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Expanded => "expanded",
            Stage::Reduced => "reduced",
            Stage::Minimized => "minimized",
            Stage::Determinized => "determinized",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| format!("unknown stage `{s}`"))
    }
}

/// Runs the pipeline over a rule registry.
pub struct Compiler<'g> {
    graph: &'g Graph,
    options: CompileOptions,
}

impl<'g> Compiler<'g> {
    pub fn new(graph: &'g Graph, options: CompileOptions) -> Self {
        Self { graph, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Full pipeline.
    pub fn compile(&self, root: RuleId, tracer: &mut impl Tracer) -> Result<SubGraph> {
        self.compile_to(root, Stage::Determinized, tracer)
    }

    pub fn compile_to(
        &self,
        root: RuleId,
        stage: Stage,
        tracer: &mut impl Tracer,
    ) -> Result<SubGraph> {
        let options = &self.options;
        let mut sub = self
            .graph
            .expand_rules(root, options.expansion_fuel, tracer)?;
        if options.silence {
            tracer.trace_pass_begin(Pass::Silence, sub.stats());
            add_silence(&mut sub);
            tracer.trace_pass_end(Pass::Silence, sub.stats());
        }
        self.check(&sub)?;
        if stage == Stage::Expanded {
            return Ok(sub);
        }

        reduce(&mut sub, options.rule_markers, tracer)?;
        self.check(&sub)?;
        if stage == Stage::Reduced {
            return Ok(sub);
        }

        if options.minimize {
            minimize(&mut sub, options.max_equivalence_iterations, tracer)?;
            self.check(&sub)?;
        }
        if stage == Stage::Minimized || !options.determinize {
            return Ok(sub);
        }

        determinize(&mut sub, options.verify, tracer)?;
        reduce(&mut sub, options.rule_markers, tracer)?;
        if options.minimize {
            minimize(&mut sub, options.max_equivalence_iterations, tracer)?;
        }
        self.check(&sub)?;
        Ok(sub)
    }

    fn check(&self, sub: &SubGraph) -> Result<()> {
        if self.options.verify {
            verify::vertex_bounds(sub)?;
        }
        Ok(())
    }
}
