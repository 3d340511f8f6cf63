//! Search filters
//!
//! A selection narrows the devices or sensors a query applies to. It holds
//! at most one compound clause, which in turn holds an ordered list of
//! key/value selectors combined with AND or OR.

use crate::model::Arg;
use serde::Deserialize;

/// A single `key == value` predicate
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScalarSelector {
    /// Field being matched, e.g. `key` or `attributes.region`
    pub key: String,
    /// Value to match against
    pub value: Arg,
}

impl ScalarSelector {
    pub fn new(key: impl Into<String>, value: impl Into<Arg>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Match on the object key
    pub fn key(value: impl Into<Arg>) -> Self {
        Self::new("key", value)
    }

    /// Match on a named attribute
    pub fn attribute(name: &str, value: impl Into<Arg>) -> Self {
        Self::new(format!("attributes.{}", name), value)
    }
}

/// How the selectors of a clause are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    And,
    Or,
}

impl ClauseKind {
    /// Key the clause is emitted under
    pub fn wire_key(&self) -> &'static str {
        match self {
            ClauseKind::And => "and",
            ClauseKind::Or => "or",
        }
    }
}

impl std::fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_key())
    }
}

/// A boolean combination of selectors
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Clause {
    pub kind: ClauseKind,
    #[serde(default)]
    pub selectors: Vec<ScalarSelector>,
}

impl Clause {
    pub fn new(kind: ClauseKind, selectors: impl IntoIterator<Item = ScalarSelector>) -> Self {
        Self {
            kind,
            selectors: selectors.into_iter().collect(),
        }
    }

    /// All selectors must match
    pub fn and(selectors: impl IntoIterator<Item = ScalarSelector>) -> Self {
        Self::new(ClauseKind::And, selectors)
    }

    /// Any selector may match
    pub fn or(selectors: impl IntoIterator<Item = ScalarSelector>) -> Self {
        Self::new(ClauseKind::Or, selectors)
    }

    /// Builder: append a selector
    pub fn with(mut self, selector: ScalarSelector) -> Self {
        self.selectors.push(selector);
        self
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Optional filter over one object category
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub clause: Option<Clause>,
}

impl Selection {
    /// A selection that matches everything
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(clause: Clause) -> Self {
        Self {
            clause: Some(clause),
        }
    }

    /// True when the selection filters nothing out
    pub fn is_empty(&self) -> bool {
        self.clause.as_ref().map(Clause::is_empty).unwrap_or(true)
    }
}

/// Per-category selections of a query
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Selections {
    #[serde(default)]
    pub devices: Selection,
    #[serde(default)]
    pub sensors: Selection,
}
