use gramfst_compiler::grammar::LoadedGrammar;
use gramfst_compiler::{PrintTracer, SubGraph, Verbosity};
use gramfst_core::Colors;

use super::run_common::{GrammarInput, load_or_exit, require_defined_rules};

pub struct CheckArgs {
    pub grammar: GrammarInput,
    pub fuel: u32,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let loaded = load_or_exit(&args.grammar);
    require_defined_rules(&loaded);

    let mut tracer = PrintTracer::new(args.verbosity, Colors::new(args.color));
    let expanded = loaded
        .graph
        .expand_rules(loaded.root, args.fuel, &mut tracer);
    tracer.print();

    match expanded {
        Ok(flat) => println!("{}", summary(&loaded, &flat)),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn summary(loaded: &LoadedGrammar, flat: &SubGraph) -> String {
    format!(
        "{}: {} rules, expanded to {}",
        flat.title(),
        loaded.graph.len(),
        flat.stats()
    )
}
