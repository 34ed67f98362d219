use gramfst_core::Colors;
use indoc::indoc;

use crate::options::{CompileOptions, RuleMarkers};
use crate::pipeline::{Compiler, Stage};
use crate::test_utils::{compile, compile_with, dump, load};
use crate::trace::{NoopTracer, PrintTracer, Verbosity};
use crate::verify::{is_deterministic, is_minimal, is_trim};
use crate::Error;

const GREETING: &str = indoc! {r#"
    {
      "root": "main",
      "rules": [
        { "name": "main", "body": [{ "item": "call" }, { "ruleref": "name" }] },
        { "name": "name", "body": [{ "one_of": [{ "item": "alice" }, { "item": "bob" }] }] }
      ]
    }
"#};

const SWITCH: &str = indoc! {r#"
    {
      "root": "cmd",
      "rules": [
        { "name": "cmd", "body": [
          { "one_of": [
            { "seq": [{ "item": "turn" }, { "item": "on", "tag": "ON" }] },
            { "seq": [{ "item": "turn" }, { "item": "off", "tag": "OFF" }] }
          ] },
          { "optional": [{ "item": "please" }] }
        ] }
      ]
    }
"#};

const DIGITS: &str = indoc! {r#"
    {
      "root": "digits",
      "rules": [
        { "name": "digits", "body": [{ "count": { "min": 2, "max": 3, "body": [{ "ruleref": "digit" }] } }] },
        { "name": "digit", "body": [{ "one_of": [{ "item": "one" }, { "item": "two" }] }] }
      ]
    }
"#};

#[test]
fn expanded_keeps_brackets() {
    let (loaded, sub) = compile(GREETING, Stage::Expanded);

    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 1: <rule
    1 -> 5: call
    2 -> 3: rule>/@main
    3 -> end: <end>
    5 -> 6: <rule
    6 -> 10: <scope
    7 -> 2: rule>/@name
    10 -> 11: alice
    10 -> 11: bob
    11 -> 7: scope>
    ");
}

#[test]
fn reduced_greeting() {
    let (loaded, sub) = compile(GREETING, Stage::Reduced);

    assert_eq!(sub.num_vertex(), 3);
    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: call
    1 -> end: <end>
    2 -> 1: alice
    2 -> 1: bob
    ");
}

#[test]
fn sibling_rules_share_their_suffix() {
    let json = indoc! {r#"
        {
          "root": "main",
          "rules": [
            { "name": "main", "body": [{ "one_of": [{ "ruleref": "first" }, { "ruleref": "second" }] }] },
            { "name": "first", "body": [{ "item": "a" }, { "item": "end" }] },
            { "name": "second", "body": [{ "item": "a" }, { "item": "end" }] }
          ]
        }
    "#};

    let (loaded, reduced) = compile(json, Stage::Reduced);
    assert_eq!(reduced.num_vertex(), 4);

    let (_, sub) = compile(json, Stage::Minimized);
    assert_eq!(sub.num_vertex(), 3);
    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: a
    1 -> end: <end>
    2 -> 1: end
    ");
}

#[test]
fn shared_prefix_is_determinized() {
    let (loaded, mut sub) = compile(SWITCH, Stage::Determinized);

    assert!(is_deterministic(&mut sub).unwrap());
    assert!(is_minimal(&mut sub).unwrap());
    assert!(is_trim(&sub).unwrap());
    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: turn
    1 -> end: <end>
    2 -> 3: on/ON
    2 -> 3: off/OFF
    3 -> 1: please
    3 -> end: <end>
    ");
}

#[test]
fn minimization_alone_leaves_shared_prefix() {
    let (loaded, mut sub) = compile(SWITCH, Stage::Minimized);

    assert!(!is_deterministic(&mut sub).unwrap());
    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: turn
    0 -> 3: turn
    1 -> end: <end>
    2 -> 1: on/ON
    2 -> 4: on/ON
    3 -> 1: off/OFF
    3 -> 4: off/OFF
    4 -> 1: please
    ");
}

#[test]
fn bounded_count_determinized() {
    let (loaded, sub) = compile(DIGITS, Stage::Determinized);

    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: one
    0 -> 2: two
    1 -> end: <end>
    2 -> 3: one
    2 -> 3: two
    3 -> 1: one
    3 -> 1: two
    3 -> end: <end>
    ");
}

#[test]
fn repeat_becomes_self_loop() {
    let json = r#"{
        "root": "main",
        "rules": [{ "name": "main", "body": [
            { "item": "call" },
            { "repeat": { "min": 1, "body": [{ "item": "again" }] } }
        ] }]
    }"#;

    let (loaded, sub) = compile(json, Stage::Determinized);

    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 1: call
    1 -> 2: again
    2 -> 2: again
    2 -> end: <end>
    ");
}

#[test]
fn silence_wraps_the_graph() {
    let options = CompileOptions::builder().silence(true).build();

    let (loaded, sub) = compile_with(GREETING, Stage::Determinized, options);

    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: <isil>
    0 -> 4: call
    1 -> 3: <fsil>
    1 -> end: <end>
    2 -> 4: call
    3 -> end: <end>
    4 -> 1: alice
    4 -> 1: bob
    ");
}

#[test]
fn kept_rule_markers_show_rule_exits() {
    let options = CompileOptions::builder()
        .rule_markers(RuleMarkers::Keep)
        .build();

    let (loaded, sub) = compile_with(GREETING, Stage::Determinized, options);

    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 4: call
    1 -> 2: rule>/@main
    2 -> end: <end>
    3 -> 1: rule>/@name
    4 -> 3: alice
    4 -> 3: bob
    ");
}

#[test]
fn determinize_without_minimize() {
    let options = CompileOptions::builder().minimize(false).build();

    let (loaded, sub) = compile_with(SWITCH, Stage::Determinized, options);

    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: turn
    1 -> end: <end>
    2 -> 3: on/ON
    2 -> 3: off/OFF
    3 -> 1: please
    3 -> end: <end>
    ");
}

#[test]
fn disabled_determinize_stops_after_minimize() {
    let options = CompileOptions::builder().determinize(false).build();

    let (loaded, sub) = compile_with(SWITCH, Stage::Determinized, options);
    let (_, minimized) = compile(SWITCH, Stage::Minimized);

    assert_eq!(dump(&loaded, &sub), dump(&loaded, &minimized));
}

#[test]
fn second_compile_pass_changes_nothing() {
    let (loaded, mut sub) = compile(SWITCH, Stage::Determinized);
    let once = dump(&loaded, &sub);

    let created = crate::determinize::determinize(&mut sub, true, &mut NoopTracer).unwrap();
    crate::reduce::reduce(&mut sub, RuleMarkers::Drop, &mut NoopTracer).unwrap();

    assert_eq!(created, 0);
    assert_eq!(dump(&loaded, &sub), once);
}

#[test]
fn every_stage_stays_in_bounds() {
    for json in [GREETING, SWITCH, DIGITS] {
        for stage in Stage::ALL {
            let options = CompileOptions::builder().verify(true).build();
            let (_, sub) = compile_with(json, stage, options);
            sub.check_vertex_bounds().unwrap();
        }
    }
}

#[test]
fn undefined_rule_is_an_error() {
    let json = r#"{
        "root": "main",
        "rules": [{ "name": "main", "body": [{ "ruleref": "nobody" }] }]
    }"#;
    let loaded = load(json);

    let err = Compiler::new(&loaded.graph, CompileOptions::default())
        .compile(loaded.root, &mut NoopTracer)
        .unwrap_err();

    assert_eq!(err.to_string(), "rule R1 is referenced but never defined");
    assert_eq!(loaded.rule_names[1], "nobody");
}

#[test]
fn cyclic_grammar_is_an_error() {
    let json = r#"{
        "root": "main",
        "rules": [{ "name": "main", "body": [{ "item": "again" }, { "ruleref": "main" }] }]
    }"#;
    let loaded = load(json);
    let options = CompileOptions::builder().expansion_fuel(20).build();

    let err = Compiler::new(&loaded.graph, options)
        .compile(loaded.root, &mut NoopTracer)
        .unwrap_err();

    assert_eq!(err, Error::ExpansionLimitExceeded { expansions: 20 });
}

#[test]
fn passes_are_traced() {
    let json = indoc! {r#"
        {
          "root": "main",
          "rules": [
            { "name": "main", "body": [{ "one_of": [{ "ruleref": "a" }, { "ruleref": "b" }] }] },
            { "name": "a", "body": [{ "item": "yes" }, { "item": "please" }] },
            { "name": "b", "body": [{ "item": "no" }, { "item": "please" }] }
          ]
        }
    "#};
    let loaded = load(json);
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);

    Compiler::new(&loaded.graph, CompileOptions::default())
        .compile(loaded.root, &mut tracer)
        .unwrap();

    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
    expand: 4 vertices / 3 arcs -> 17 vertices / 13 arcs
    remove-brackets: 17 vertices / 13 arcs -> 17 vertices / 17 arcs
    prune: 17 vertices / 17 arcs -> 17 vertices / 5 arcs
    dedup: 17 vertices / 5 arcs -> 17 vertices / 5 arcs
    compact: 17 vertices / 5 arcs -> 4 vertices / 5 arcs
    minimize: 4 vertices / 5 arcs -> 3 vertices / 4 arcs
    determinize: 3 vertices / 4 arcs -> 3 vertices / 4 arcs
    remove-brackets: 3 vertices / 4 arcs -> 3 vertices / 4 arcs
    prune: 3 vertices / 4 arcs -> 3 vertices / 4 arcs
    dedup: 3 vertices / 4 arcs -> 3 vertices / 4 arcs
    compact: 3 vertices / 4 arcs -> 3 vertices / 4 arcs
    minimize: 3 vertices / 4 arcs -> 3 vertices / 4 arcs
    ");
}

#[test]
fn tag_alternative_warns_without_verbosity() {
    let json = indoc! {r#"
        {
          "root": "main",
          "rules": [
            { "name": "main", "body": [{ "one_of": [{ "tag": "x" }, { "tag": "y" }] }, { "item": "a" }] }
          ]
        }
    "#};
    let loaded = load(json);
    let mut tracer = PrintTracer::new(Verbosity::Quiet, Colors::OFF);

    let sub = Compiler::new(&loaded.graph, CompileOptions::default())
        .compile(loaded.root, &mut tracer)
        .unwrap();

    insta::assert_snapshot!(dump(&loaded, &sub), @r"
    start: 0
    0 -> 2: <tag>/x
    0 -> 2: <tag>/y
    1 -> end: <end>
    2 -> 1: a
    ");
    assert_eq!(
        tracer.lines(),
        ["warning: vertex 0 has different outputs for input <tag>"]
    );
}

#[test]
fn stage_names_round_trip() {
    for stage in Stage::ALL {
        assert_eq!(stage.name().parse::<Stage>(), Ok(stage));
    }
    assert_eq!(
        "flattened".parse::<Stage>(),
        Err("unknown stage `flattened`".to_owned())
    );
}
