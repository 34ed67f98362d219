//! Command builders for the CLI.
//!
//! Every command accepts every flag so invocations can be edited from one
//! subcommand to another; flags a command ignores are hidden from `--help`.

use clap::Command;

use super::args::*;

/// Grammar input and root selection, shared by all commands.
fn with_grammar_args(cmd: Command) -> Command {
    cmd.arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(root_arg())
}

/// Pipeline knobs, hidden for commands that only expand.
fn with_pipeline_args(cmd: Command, hide: bool) -> Command {
    cmd.arg(max_iterations_arg().hide(hide))
        .arg(keep_rule_markers_arg().hide(hide))
        .arg(silence_arg().hide(hide))
        .arg(no_minimize_arg().hide(hide))
        .arg(no_determinize_arg().hide(hide))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("gramfst")
        .about("Compile speech grammars into finite-state transition graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(compile_command())
}

/// Build and expand a grammar without reducing it.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar and expand its root rule")
        .override_usage(
            "\
  gramfst check <GRAMMAR>
  gramfst check -g <TEXT> [--root <RULE>]",
        )
        .after_help(
            r#"EXAMPLES:
  gramfst check grammar.json
  gramfst check grammar.json --root digits
  gramfst check -g '{"root":"a","rules":[{"name":"a","body":[{"item":"yes"}]}]}'"#,
        );

    let cmd = with_grammar_args(cmd)
        .arg(fuel_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_pipeline_args(cmd, true)
        .arg(stage_arg().hide(true))
        .arg(json_arg().hide(true))
}

/// Print the graph after a pipeline stage.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print the graph after a pipeline stage")
        .override_usage(
            "\
  gramfst dump <GRAMMAR> [--stage <STAGE>]
  gramfst dump -g <TEXT> [--stage <STAGE>]",
        )
        .after_help(
            r#"EXAMPLES:
  gramfst dump grammar.json                    # fully compiled
  gramfst dump grammar.json --stage expanded   # brackets still present
  gramfst dump grammar.json --stage reduced -v # with pass summaries"#,
        );

    let cmd = with_grammar_args(cmd)
        .arg(stage_arg())
        .arg(fuel_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    with_pipeline_args(cmd, false).arg(json_arg().hide(true))
}

/// Run the full pipeline.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Compile a grammar and report the result")
        .override_usage(
            "\
  gramfst compile <GRAMMAR> [--json]
  gramfst compile -g <TEXT> [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  gramfst compile grammar.json
  gramfst compile grammar.json --json > graph.json
  gramfst compile grammar.json --silence --keep-rule-markers"#,
        );

    let cmd = with_grammar_args(cmd)
        .arg(json_arg())
        .arg(fuel_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    with_pipeline_args(cmd, false).arg(stage_arg().hide(true))
}
