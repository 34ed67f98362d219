use gramfst_compiler::dump::{GraphJson, LabelNames};
use gramfst_compiler::grammar::LoadedGrammar;
use gramfst_compiler::{CompileOptions, Stage, SubGraph, Verbosity};

use super::run_common::{GrammarInput, compile_or_exit, load_or_exit};

pub struct CompileArgs {
    pub grammar: GrammarInput,
    pub json: bool,
    pub options: CompileOptions,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let loaded = load_or_exit(&args.grammar);
    let sub = compile_or_exit(
        &loaded,
        args.options,
        Stage::Determinized,
        args.verbosity,
        args.color,
    );

    let output = if args.json {
        render_json(&loaded, &sub)
    } else {
        render_summary(&sub)
    };
    println!("{}", output);
}

pub fn render_summary(sub: &SubGraph) -> String {
    format!("{}: {}", sub.title(), sub.stats())
}

pub fn render_json(loaded: &LoadedGrammar, sub: &SubGraph) -> String {
    let view = GraphJson::new(sub, LabelNames::new(&loaded.interner, &loaded.rule_names));
    serde_json::to_string_pretty(&view).expect("graph serialization never fails")
}
