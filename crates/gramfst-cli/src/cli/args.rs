//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! visible or hidden (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar file (positional, "-" for stdin).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar JSON file (use \"-\" for stdin)")
}

/// Inline grammar text (-g/--grammar).
pub fn grammar_text_arg() -> Arg {
    Arg::new("grammar_text")
        .short('g')
        .long("grammar")
        .value_name("TEXT")
        .conflicts_with("grammar_path")
        .help("Inline grammar JSON")
}

/// Root rule override (--root).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("RULE")
        .help("Rule to compile (defaults to the document's root)")
}

/// Pipeline stop point (--stage).
pub fn stage_arg() -> Arg {
    Arg::new("stage")
        .long("stage")
        .value_name("STAGE")
        .default_value("determinized")
        .value_parser(["expanded", "reduced", "minimized", "determinized"])
        .help("Stage to stop after")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the compiled graph as JSON")
}

/// Minimization sweep cap (--max-iterations).
pub fn max_iterations_arg() -> Arg {
    Arg::new("max_iterations")
        .long("max-iterations")
        .value_name("N")
        .default_value("10")
        .value_parser(value_parser!(u32))
        .help("Maximum equivalence minimization sweeps")
}

/// Rule expansion limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("100000")
        .value_parser(value_parser!(u32))
        .help("Rule expansion limit")
}

/// Keep rule segment markers (--keep-rule-markers).
pub fn keep_rule_markers_arg() -> Arg {
    Arg::new("keep_rule_markers")
        .long("keep-rule-markers")
        .action(ArgAction::SetTrue)
        .help("Keep rule exit markers as transitions")
}

/// Optional initial and final silence (--silence).
pub fn silence_arg() -> Arg {
    Arg::new("silence")
        .long("silence")
        .action(ArgAction::SetTrue)
        .help("Wrap the graph in optional initial and final silence")
}

/// Skip minimization (--no-minimize).
pub fn no_minimize_arg() -> Arg {
    Arg::new("no_minimize")
        .long("no-minimize")
        .action(ArgAction::SetTrue)
        .help("Skip equivalence minimization")
}

/// Skip determinization (--no-determinize).
pub fn no_determinize_arg() -> Arg {
    Arg::new("no_determinize")
        .long("no-determinize")
        .action(ArgAction::SetTrue)
        .help("Skip determinization")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Trace compiler passes (-v for merges, -vv for every determinization step)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
