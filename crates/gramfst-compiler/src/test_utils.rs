//! Shared helpers for compiler tests.

use gramfst_core::{Label, RuleId, Symbol};

use crate::dump::{GraphPrinter, LabelNames};
use crate::grammar::{GrammarDoc, LoadedGrammar};
use crate::pipeline::{Compiler, Stage};
use crate::subgraph::SubGraph;
use crate::{CompileOptions, NoopTracer};

/// Symbol label with a raw index, for builder-level tests without an interner.
pub fn word(index: u32) -> Label {
    Label::Symbol(Symbol::from_raw(index))
}

pub fn rule(id: u32) -> RuleId {
    RuleId::new(id)
}

pub fn load(json: &str) -> LoadedGrammar {
    GrammarDoc::parse(json)
        .and_then(|doc| doc.load())
        .unwrap_or_else(|e| panic!("grammar failed to load: {e}"))
}

/// Compile `json` up to `stage` with default options.
pub fn compile(json: &str, stage: Stage) -> (LoadedGrammar, SubGraph) {
    compile_with(json, stage, CompileOptions::default())
}

pub fn compile_with(
    json: &str,
    stage: Stage,
    options: CompileOptions,
) -> (LoadedGrammar, SubGraph) {
    let loaded = load(json);
    let sub = Compiler::new(&loaded.graph, options)
        .compile_to(loaded.root, stage, &mut NoopTracer)
        .unwrap_or_else(|e| panic!("compilation failed: {e}"));
    (loaded, sub)
}

/// Dump with names resolved through the grammar's interner.
pub fn dump(loaded: &LoadedGrammar, sub: &SubGraph) -> String {
    GraphPrinter::new(sub)
        .with_names(LabelNames::new(&loaded.interner, &loaded.rule_names))
        .dump()
}

/// Dump without name resolution.
pub fn dump_raw(sub: &SubGraph) -> String {
    GraphPrinter::new(sub).dump()
}
