use gramfst_core::{Arc, Colors, Interner, Label, RuleId};
use serde_json::json;

use crate::dump::{GraphJson, GraphPrinter, LabelNames};
use crate::pipeline::Stage;
use crate::subgraph::SubGraph;
use crate::test_utils::{compile, rule, word};

#[test]
fn names_fall_back_to_raw_ids() {
    let mut interner = Interner::new();
    let hello = interner.intern("hello");
    let rules = vec!["main".to_owned()];
    let names = LabelNames::new(&interner, &rules);

    assert_eq!(names.render(Label::Symbol(hello)), "hello");
    assert_eq!(names.render(word(7)), "#7");
    assert_eq!(names.render(Label::Rule(RuleId::new(0))), "@main");
    assert_eq!(names.render(Label::Rule(RuleId::new(9))), "@R9");
    assert_eq!(names.render(Label::FinalSilence), "<fsil>");
    assert_eq!(LabelNames::default().render(word(0)), "#0");
}

#[test]
fn arcs_are_printed_in_forward_order() {
    let mut sub = SubGraph::new(rule(0), "main");
    sub.new_vertex();
    sub.new_vertex();
    sub.push_arc(Arc::terminal(2));
    sub.push_arc(Arc::new(1, 2, word(1), Label::Epsilon));
    sub.push_arc(Arc::new(0, 1, word(0), word(3)));
    sub.push_arc(Arc::new(0, 1, Label::Tag, word(2)));

    insta::assert_snapshot!(GraphPrinter::new(&sub).dump(), @r"
    start: 0
    0 -> 1: <tag>/#2
    0 -> 1: #0/#3
    1 -> 2: #1
    2 -> end: <end>
    ");
}

#[test]
fn colored_dump() {
    let mut sub = SubGraph::new(rule(0), "main");
    sub.push_arc(Arc::terminal(0));

    let out = GraphPrinter::new(&sub).with_colors(Colors::ON).dump();

    assert_eq!(
        out,
        "start: \x1b[34m0\x1b[0m\n\
         \x1b[34m0\x1b[0m -> \x1b[32mend\x1b[0m: \x1b[2m<end>\x1b[0m\n"
    );
}

#[test]
fn json_view() {
    let json = r#"{
        "root": "main",
        "rules": [{ "name": "main", "body": [{ "item": "on", "tag": "ON" }] }]
    }"#;
    let (loaded, sub) = compile(json, Stage::Determinized);

    let view = GraphJson::new(&sub, LabelNames::new(&loaded.interner, &loaded.rule_names));

    assert_eq!(
        serde_json::to_value(&view).unwrap(),
        json!({
            "title": "main",
            "start": 0,
            "vertices": 2,
            "arcs": [
                { "from": 0, "to": 1, "input": "on", "output": "ON" },
                { "from": 1, "to": null, "input": "<end>" }
            ]
        })
    );
}
