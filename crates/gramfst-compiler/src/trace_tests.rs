use gramfst_core::{Colors, RuleId};

use crate::test_utils::word;
use crate::trace::{GraphStats, Pass, PrintTracer, Tracer, Verbosity};

fn stats(vertices: u32, arcs: usize) -> GraphStats {
    GraphStats { vertices, arcs }
}

fn emit_all(tracer: &mut PrintTracer) {
    tracer.trace_pass_begin(Pass::Minimize, stats(5, 9));
    tracer.trace_rule_expanded(RuleId::new(2), 6);
    tracer.trace_equivalence_merge(1, 3);
    tracer.trace_determinize_merge(0, 1, 2, 7);
    tracer.trace_output_conflict(4, word(3));
    tracer.trace_not_converged(10);
    tracer.trace_pass_end(Pass::Minimize, stats(4, 7));
}

#[test]
fn quiet_shows_warnings_only() {
    let mut tracer = PrintTracer::new(Verbosity::Quiet, Colors::OFF);
    emit_all(&mut tracer);

    assert_eq!(
        tracer.lines(),
        [
            "warning: vertex 4 has different outputs for input #3",
            "warning: minimization did not converge after 10 iterations",
        ]
    );
}

#[test]
fn default_shows_summaries_and_warnings() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    emit_all(&mut tracer);

    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
    warning: vertex 4 has different outputs for input #3
    warning: minimization did not converge after 10 iterations
    minimize: 5 vertices / 9 arcs -> 4 vertices / 7 arcs
    ");
}

#[test]
fn verbose_adds_expansions_and_merges() {
    let mut tracer = PrintTracer::new(Verbosity::Verbose, Colors::OFF);
    emit_all(&mut tracer);

    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
      expand R2 (+6 arcs)
      merge 3 into 1
    warning: vertex 4 has different outputs for input #3
    warning: minimization did not converge after 10 iterations
    minimize: 5 vertices / 9 arcs -> 4 vertices / 7 arcs
    ");
}

#[test]
fn very_verbose_adds_determinization_merges() {
    let mut tracer = PrintTracer::new(Verbosity::VeryVerbose, Colors::OFF);
    emit_all(&mut tracer);

    assert!(tracer.lines().contains(&"  at 0: 1 + 2 -> 7".to_owned()));
    assert_eq!(tracer.into_lines().len(), 6);
}

#[test]
fn nested_passes_pair_up() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    tracer.trace_pass_begin(Pass::Determinize, stats(3, 4));
    tracer.trace_pass_begin(Pass::Prune, stats(6, 8));
    tracer.trace_pass_end(Pass::Prune, stats(6, 5));
    tracer.trace_pass_end(Pass::Determinize, stats(3, 3));
    // Unmatched end reports no change.
    tracer.trace_pass_end(Pass::Silence, stats(2, 2));

    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
    prune: 6 vertices / 8 arcs -> 6 vertices / 5 arcs
    determinize: 3 vertices / 4 arcs -> 3 vertices / 3 arcs
    silence: 2 vertices / 2 arcs -> 2 vertices / 2 arcs
    ");
}

#[test]
fn colored_pass_name() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::ON);
    tracer.trace_pass_begin(Pass::RemoveBrackets, stats(1, 1));
    tracer.trace_pass_end(Pass::RemoveBrackets, stats(1, 0));

    assert_eq!(
        tracer.lines()[0],
        "\x1b[34mremove-brackets\x1b[0m: 1 vertices / 1 arcs -> 1 vertices / 0 arcs"
    );
}

#[test]
fn verbosity_is_ordered() {
    assert!(Verbosity::Quiet < Verbosity::Default);
    assert!(Verbosity::Default < Verbosity::Verbose);
    assert!(Verbosity::Verbose < Verbosity::VeryVerbose);
}
