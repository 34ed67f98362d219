//! Shared plumbing for commands that load and compile a grammar.

use std::path::PathBuf;

use gramfst_compiler::grammar::LoadedGrammar;
use gramfst_compiler::{CompileOptions, Compiler, PrintTracer, Stage, SubGraph, Verbosity};
use gramfst_core::Colors;

use super::grammar_loader::{load_grammar, load_grammar_text};

pub struct GrammarInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
    pub root: Option<String>,
}

/// Load the grammar or exit with an error message.
pub fn load_or_exit(input: &GrammarInput) -> LoadedGrammar {
    let loaded = load_grammar_text(input.path.as_deref(), input.text.as_deref())
        .and_then(|json| load_grammar(&json, input.root.as_deref()));
    match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Exit if any referenced rule is never defined, naming each one.
pub fn require_defined_rules(loaded: &LoadedGrammar) {
    let undefined = loaded.graph.undefined_rules();
    if undefined.is_empty() {
        return;
    }
    for rule in undefined {
        let name = loaded
            .rule_names
            .get(rule.get() as usize)
            .map_or_else(|| rule.to_string(), Clone::clone);
        eprintln!("error: rule '{}' is referenced but never defined", name);
    }
    std::process::exit(1);
}

/// Run the pipeline up to `stage`, printing trace lines to stderr.
pub fn compile_or_exit(
    loaded: &LoadedGrammar,
    options: CompileOptions,
    stage: Stage,
    verbosity: Verbosity,
    color: bool,
) -> SubGraph {
    require_defined_rules(loaded);
    let mut tracer = PrintTracer::new(verbosity, Colors::new(color));
    let result = Compiler::new(&loaded.graph, options).compile_to(loaded.root, stage, &mut tracer);
    tracer.print();
    match result {
        Ok(sub) => sub,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
