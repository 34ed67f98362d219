//! Compilation options.

/// What bracket removal does with `EndRule` arcs carrying a rule marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuleMarkers {
    /// Eliminate them like any other bracket.
    #[default]
    Drop,
    /// Keep them as ordinary transitions so rule segments stay visible.
    Keep,
}

/// Knobs for the [`Compiler`](crate::Compiler) pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    pub max_equivalence_iterations: u32,
    /// Upper bound on rule-call expansions; cyclic grammars run out of it.
    pub expansion_fuel: u32,
    pub rule_markers: RuleMarkers,
    pub minimize: bool,
    pub determinize: bool,
    /// Wrap the graph in optional initial and final silence.
    pub silence: bool,
    /// Run the structural checks in `verify` after each stage.
    pub verify: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_equivalence_iterations: 10,
            expansion_fuel: 100_000,
            rule_markers: RuleMarkers::Drop,
            minimize: true,
            determinize: true,
            silence: false,
            verify: cfg!(debug_assertions),
        }
    }
}

impl CompileOptions {
    pub fn builder() -> CompileOptionsBuilder {
        CompileOptionsBuilder::default()
    }
}

/// Builder for `CompileOptions`.
#[derive(Clone, Debug, Default)]
pub struct CompileOptionsBuilder {
    options: CompileOptions,
}

impl CompileOptionsBuilder {
    pub fn max_equivalence_iterations(mut self, iterations: u32) -> Self {
        self.options.max_equivalence_iterations = iterations;
        self
    }

    pub fn expansion_fuel(mut self, fuel: u32) -> Self {
        self.options.expansion_fuel = fuel;
        self
    }

    pub fn rule_markers(mut self, markers: RuleMarkers) -> Self {
        self.options.rule_markers = markers;
        self
    }

    pub fn minimize(mut self, enabled: bool) -> Self {
        self.options.minimize = enabled;
        self
    }

    pub fn determinize(mut self, enabled: bool) -> Self {
        self.options.determinize = enabled;
        self
    }

    pub fn silence(mut self, enabled: bool) -> Self {
        self.options.silence = enabled;
        self
    }

    pub fn verify(mut self, enabled: bool) -> Self {
        self.options.verify = enabled;
        self
    }

    pub fn build(self) -> CompileOptions {
        self.options
    }
}
