use gramfst_compiler::grammar::LoadedGrammar;
use gramfst_compiler::{CompileOptions, Compiler, NoopTracer, SubGraph};

use super::compile::{render_json, render_summary};
use super::grammar_loader::load_grammar;

const GREETING: &str = r#"{
    "root": "main",
    "rules": [
        { "name": "main", "body": [{ "item": "call" }, { "ruleref": "name" }] },
        { "name": "name", "body": [{ "one_of": [{ "item": "alice" }, { "item": "bob" }] }] }
    ]
}"#;

fn compiled() -> (LoadedGrammar, SubGraph) {
    let loaded = load_grammar(GREETING, None).unwrap();
    let sub = Compiler::new(&loaded.graph, CompileOptions::default())
        .compile(loaded.root, &mut NoopTracer)
        .unwrap();
    (loaded, sub)
}

#[test]
fn summary_line() {
    let (_, sub) = compiled();

    assert_eq!(render_summary(&sub), "main: 3 vertices, 4 arcs");
}

#[test]
fn json_output() {
    let (loaded, sub) = compiled();

    insta::assert_snapshot!(render_json(&loaded, &sub), @r#"
    {
      "title": "main",
      "start": 0,
      "vertices": 3,
      "arcs": [
        {
          "from": 0,
          "to": 2,
          "input": "call"
        },
        {
          "from": 1,
          "to": null,
          "input": "<end>"
        },
        {
          "from": 2,
          "to": 1,
          "input": "alice"
        },
        {
          "from": 2,
          "to": 1,
          "input": "bob"
        }
      ]
    }
    "#);
}
