//! JSON grammar driver.
//!
//! A small stand-in for a real grammar front end: it reads a JSON document
//! and issues builder calls in document order.
//!
//! ```json
//! {
//!   "root": "main",
//!   "rules": [
//!     { "name": "main", "body": [{ "item": "call" }, { "ruleref": "name" }] },
//!     { "name": "name", "body": [{ "one_of": [{ "item": "alice" }, { "item": "bob" }] }] }
//!   ]
//! }
//! ```
//!
//! Words, tag values and rule names are interned; rule ids follow definition
//! order, with rules that are referenced but never defined numbered after
//! them.

use indexmap::IndexSet;
use serde::Deserialize;

use gramfst_core::{Interner, Label, RuleId};

use crate::graph::Graph;
use crate::subgraph::{ScopeKind, SubGraph};
use crate::{Error, Result};

/// Grammar document.
#[derive(Debug, Clone, Deserialize)]
pub struct GrammarDoc {
    pub root: String,
    pub rules: Vec<RuleDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleDoc {
    pub name: String,
    pub body: Vec<Expr>,
}

/// Grammar expression. Each form is an object keyed by its construct.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    /// `{"item": word}` or `{"item": word, "tag": value}`
    Item {
        item: String,
        #[serde(default)]
        tag: Option<String>,
    },
    /// `{"tag": value}`
    Tag { tag: String },
    /// `{"ruleref": name}`
    RuleRef { ruleref: String },
    Seq { seq: Vec<Expr> },
    OneOf { one_of: Vec<Expr> },
    Count { count: CountExpr },
    Repeat { repeat: RepeatExpr },
    Optional { optional: Vec<Expr> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountExpr {
    pub min: u32,
    pub max: u32,
    pub body: Vec<Expr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepeatExpr {
    #[serde(default)]
    pub min: u32,
    pub body: Vec<Expr>,
}

/// Rule registry built from a document, with the names needed to print it.
#[derive(Debug, Clone)]
pub struct LoadedGrammar {
    pub graph: Graph,
    pub interner: Interner,
    /// Rule names indexed by `RuleId`.
    pub rule_names: Vec<String>,
    pub root: RuleId,
}

impl GrammarDoc {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Json(e.to_string()))
    }

    /// Build every rule body.
    pub fn load(&self) -> Result<LoadedGrammar> {
        let mut loader = Loader {
            graph: Graph::new(),
            interner: Interner::new(),
            rules: self.rules.iter().map(|r| r.name.clone()).collect(),
        };
        let root = loader
            .rules
            .get_index_of(&self.root)
            .map(|i| RuleId::new(i as u32))
            .ok_or_else(|| Error::UnknownRuleName(self.root.clone()))?;

        for rule in &self.rules {
            let id = loader.rule_id(&rule.name);
            loader.graph.begin_rule(id, &rule.name)?;
            for expr in &rule.body {
                loader.emit(id, expr)?;
            }
            loader.graph.end_rule(id)?;
        }

        Ok(LoadedGrammar {
            graph: loader.graph,
            interner: loader.interner,
            rule_names: loader.rules.into_iter().collect(),
            root,
        })
    }
}

struct Loader {
    graph: Graph,
    interner: Interner,
    rules: IndexSet<String>,
}

impl Loader {
    fn rule_id(&mut self, name: &str) -> RuleId {
        let (index, _) = self.rules.insert_full(name.to_owned());
        RuleId::new(index as u32)
    }

    fn word(&mut self, text: &str) -> Label {
        Label::Symbol(self.interner.intern(text))
    }

    fn body(&mut self, host: RuleId) -> Result<&mut SubGraph> {
        self.graph
            .rule_mut(host)
            .ok_or(Error::RuleNotOpen { rule: host })
    }

    fn emit(&mut self, host: RuleId, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Item { item, tag } => {
                let input = self.word(item);
                let output = match tag {
                    Some(tag) => self.word(tag),
                    None => Label::Epsilon,
                };
                self.body(host)?.add_item(input, output)
            }
            Expr::Tag { tag } => {
                let tag = self.word(tag);
                self.body(host)?.add_tag(tag)
            }
            Expr::RuleRef { ruleref } => {
                let target = self.rule_id(ruleref);
                self.graph.add_rule_ref(host, target)
            }
            Expr::Seq { seq } => self.scoped(host, ScopeKind::Item, seq),
            Expr::OneOf { one_of } => self.scoped(host, ScopeKind::OneOf, one_of),
            Expr::Count { count } => self.scoped(
                host,
                ScopeKind::Count {
                    min: count.min,
                    max: count.max,
                },
                &count.body,
            ),
            Expr::Repeat { repeat } => {
                self.scoped(host, ScopeKind::Repeat { min: repeat.min }, &repeat.body)
            }
            Expr::Optional { optional } => self.scoped(host, ScopeKind::Optional, optional),
        }
    }

    fn scoped(&mut self, host: RuleId, kind: ScopeKind, body: &[Expr]) -> Result<()> {
        self.body(host)?.begin_scope(kind)?;
        for expr in body {
            self.emit(host, expr)?;
        }
        self.body(host)?.end_scope()
    }
}
