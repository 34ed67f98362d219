use std::path::Path;

use gramfst_compiler::Error;

use super::grammar_loader::{LoadError, load_grammar, load_grammar_text};

const TWO_RULES: &str = r#"{
    "root": "main",
    "rules": [
        { "name": "main", "body": [{ "item": "go" }, { "ruleref": "digit" }] },
        { "name": "digit", "body": [{ "one_of": [{ "item": "one" }, { "item": "two" }] }] }
    ]
}"#;

#[test]
fn inline_text_wins_over_path() {
    let text = load_grammar_text(Some(Path::new("missing.json")), Some("{}")).unwrap();

    assert_eq!(text, "{}");
}

#[test]
fn missing_input() {
    let err = load_grammar_text(None, None).unwrap_err();

    assert!(matches!(err, LoadError::MissingInput));
    assert_eq!(
        err.to_string(),
        "grammar is required: use positional argument or -g/--grammar"
    );
}

#[test]
fn unreadable_file_names_the_path() {
    let err = load_grammar_text(Some(Path::new("/nonexistent/grammar.json")), None).unwrap_err();

    assert!(matches!(err, LoadError::Read { .. }));
    assert!(
        err.to_string()
            .starts_with("failed to read '/nonexistent/grammar.json': ")
    );
}

#[test]
fn root_override() {
    let loaded = load_grammar(TWO_RULES, Some("digit")).unwrap();

    assert_eq!(loaded.rule_names[loaded.root.get() as usize], "digit");
}

#[test]
fn unknown_root_override() {
    let err = load_grammar(TWO_RULES, Some("letters")).unwrap_err();

    assert!(matches!(
        err,
        LoadError::Grammar(Error::UnknownRuleName(ref name)) if name == "letters"
    ));
    assert_eq!(err.to_string(), "unknown rule `letters`");
}

#[test]
fn invalid_json() {
    let err = load_grammar("{ not json", None).unwrap_err();

    assert!(matches!(err, LoadError::Grammar(Error::Json(_))));
}
