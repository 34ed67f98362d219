//! Transition label space.
//!
//! A label is either an interned symbol (word, tag value, phoneme), one of a
//! fixed set of sentinels, or a reference to a rule. The numeric encoding
//! used by external tooling is available through [`Label::to_raw`] and
//! [`Label::from_raw`]: symbols are `>= 0`, sentinels occupy `-1..=-11`, and
//! rule `r` is `-(12 + r)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Identifier of a grammar rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Transition label.
///
/// Ordering is total: sentinels in declaration order, then rules, then symbols.
/// Passes that sort arcs by label rely only on this being consistent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Transition consumable without input.
    #[default]
    Epsilon,
    /// Tag carrier; the tag value lives in the output label.
    Tag,
    WordBoundary,
    /// Accepting transition.
    Terminal,
    BeginScope,
    EndScope,
    BeginRule,
    EndRule,
    /// Tombstone marker.
    Discard,
    InitialSilence,
    FinalSilence,
    /// Unexpanded call to a rule (input side) or rule segment marker (output side).
    Rule(RuleId),
    Symbol(Symbol),
}

const SENTINELS: [Label; 11] = [
    Label::Epsilon,
    Label::Tag,
    Label::WordBoundary,
    Label::Terminal,
    Label::BeginScope,
    Label::EndScope,
    Label::BeginRule,
    Label::EndRule,
    Label::Discard,
    Label::InitialSilence,
    Label::FinalSilence,
];

const RULE_BASE: i64 = SENTINELS.len() as i64 + 1;

impl Label {
    /// Scope and rule brackets: structural markers removed before the graph
    /// is used as an automaton.
    #[inline]
    pub fn is_bracket(self) -> bool {
        matches!(
            self,
            Label::BeginScope | Label::EndScope | Label::BeginRule | Label::EndRule
        )
    }

    #[inline]
    pub fn is_epsilon(self) -> bool {
        self == Label::Epsilon
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        !matches!(self, Label::Rule(_) | Label::Symbol(_))
    }

    /// Rule id if this label references a rule.
    #[inline]
    pub fn rule(self) -> Option<RuleId> {
        match self {
            Label::Rule(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Label::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Signed-integer encoding.
    pub fn to_raw(self) -> i64 {
        match self {
            Label::Symbol(sym) => i64::from(sym.as_u32()),
            Label::Rule(id) => -(RULE_BASE + i64::from(id.get())),
            Label::Epsilon => -1,
            Label::Tag => -2,
            Label::WordBoundary => -3,
            Label::Terminal => -4,
            Label::BeginScope => -5,
            Label::EndScope => -6,
            Label::BeginRule => -7,
            Label::EndRule => -8,
            Label::Discard => -9,
            Label::InitialSilence => -10,
            Label::FinalSilence => -11,
        }
    }

    /// Decode the signed-integer encoding. Returns `None` for values outside
    /// the `u32` symbol or rule range.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw >= 0 {
            return u32::try_from(raw).ok().map(|v| Label::Symbol(Symbol::from_raw(v)));
        }
        let magnitude = raw.checked_neg()?;
        if magnitude < RULE_BASE {
            return Some(SENTINELS[(magnitude - 1) as usize]);
        }
        u32::try_from(magnitude - RULE_BASE)
            .ok()
            .map(|id| Label::Rule(RuleId::new(id)))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Tag => write!(f, "<tag>"),
            Label::WordBoundary => write!(f, "<wb>"),
            Label::Terminal => write!(f, "<end>"),
            Label::BeginScope => write!(f, "<scope"),
            Label::EndScope => write!(f, "scope>"),
            Label::BeginRule => write!(f, "<rule"),
            Label::EndRule => write!(f, "rule>"),
            Label::Discard => write!(f, "<discard>"),
            Label::InitialSilence => write!(f, "<isil>"),
            Label::FinalSilence => write!(f, "<fsil>"),
            Label::Rule(id) => write!(f, "@{id}"),
            Label::Symbol(sym) => write!(f, "#{}", sym.as_u32()),
        }
    }
}
