//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields, ignoring hidden ones
//! - `Into<*Args>` impls bridge dispatch to command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use gramfst_compiler::{CompileOptions, RuleMarkers, Stage, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::run_common::GrammarInput;

pub struct GrammarParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub root: Option<String>,
}

impl GrammarParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            root: m.get_one::<String>("root").cloned(),
        }
    }
}

impl From<GrammarParams> for GrammarInput {
    fn from(p: GrammarParams) -> Self {
        Self {
            path: p.grammar_path,
            text: p.grammar_text,
            root: p.root,
        }
    }
}

pub struct CheckParams {
    pub grammar: GrammarParams,
    pub fuel: u32,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: pipeline flags, stage and json are parsed but not extracted
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar: GrammarParams::from_matches(m),
            fuel: parse_fuel(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar: p.grammar.into(),
            fuel: p.fuel,
            verbosity: parse_verbosity(p.verbose),
            color: p.color.should_colorize(),
        }
    }
}

/// Pipeline flags shared by dump and compile.
pub struct PipelineParams {
    pub max_iterations: u32,
    pub fuel: u32,
    pub keep_rule_markers: bool,
    pub silence: bool,
    pub no_minimize: bool,
    pub no_determinize: bool,
}

impl PipelineParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            max_iterations: m.get_one::<u32>("max_iterations").copied().unwrap_or(10),
            fuel: parse_fuel(m),
            keep_rule_markers: m.get_flag("keep_rule_markers"),
            silence: m.get_flag("silence"),
            no_minimize: m.get_flag("no_minimize"),
            no_determinize: m.get_flag("no_determinize"),
        }
    }

    fn options(&self) -> CompileOptions {
        let markers = if self.keep_rule_markers {
            RuleMarkers::Keep
        } else {
            RuleMarkers::Drop
        };
        CompileOptions::builder()
            .max_equivalence_iterations(self.max_iterations)
            .expansion_fuel(self.fuel)
            .rule_markers(markers)
            .silence(self.silence)
            .minimize(!self.no_minimize)
            .determinize(!self.no_determinize)
            .build()
    }
}

pub struct DumpParams {
    pub grammar: GrammarParams,
    pub stage: Stage,
    pub pipeline: PipelineParams,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: json is parsed but not extracted
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar: GrammarParams::from_matches(m),
            stage: parse_stage(m),
            pipeline: PipelineParams::from_matches(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar: p.grammar.into(),
            stage: p.stage,
            options: p.pipeline.options(),
            verbosity: parse_verbosity(p.verbose),
            color: p.color.should_colorize(),
        }
    }
}

pub struct CompileParams {
    pub grammar: GrammarParams,
    pub json: bool,
    pub pipeline: PipelineParams,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: stage is parsed but not extracted
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar: GrammarParams::from_matches(m),
            json: m.get_flag("json"),
            pipeline: PipelineParams::from_matches(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            grammar: p.grammar.into(),
            json: p.json,
            options: p.pipeline.options(),
            verbosity: parse_verbosity(p.verbose),
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_fuel(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("fuel").copied().unwrap_or(100_000)
}

/// The stage flag is restricted to valid names by its value parser.
fn parse_stage(m: &ArgMatches) -> Stage {
    m.get_one::<String>("stage")
        .and_then(|s| s.parse().ok())
        .unwrap_or(Stage::Determinized)
}

/// Without -v only warnings are shown.
fn parse_verbosity(count: u8) -> Verbosity {
    match count {
        0 => Verbosity::Quiet,
        1 => Verbosity::Verbose,
        _ => Verbosity::VeryVerbose,
    }
}
