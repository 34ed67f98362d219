use gramfst_compiler::dump::{GraphPrinter, LabelNames};
use gramfst_compiler::{CompileOptions, Stage, Verbosity};
use gramfst_core::Colors;

use super::run_common::{GrammarInput, compile_or_exit, load_or_exit};

pub struct DumpArgs {
    pub grammar: GrammarInput,
    pub stage: Stage,
    pub options: CompileOptions,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let loaded = load_or_exit(&args.grammar);
    let sub = compile_or_exit(
        &loaded,
        args.options,
        args.stage,
        args.verbosity,
        args.color,
    );

    let printer = GraphPrinter::new(&sub)
        .with_names(LabelNames::new(&loaded.interner, &loaded.rule_names))
        .with_colors(Colors::new(args.color));
    print!("{}", printer.dump());
}
