//! Encodable object tree
//!
//! Every value handed to an encoder is first viewed as a `Node`: either a
//! plain JSON shape (null, bool, number, string, list, map) or one of the
//! domain objects the profiles know how to convert. Converters return new
//! nodes, so the same walk handles converter output and caller input.

use crate::model::{Arg, Device, Point, Sensor, WriteRequest};
use crate::query::{
    Clause, ClauseKind, Function, FunctionKind, QueryBuilder, ScalarSelector, Selection,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// A borrowed view of an encodable value
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Cow<'a, str>),
    List(Vec<Node<'a>>),
    Map(Vec<(Cow<'a, str>, Node<'a>)>),
    DateTime(DateTime<FixedOffset>),
    NaiveDateTime(NaiveDateTime),
    Point(&'a Point),
    Device(&'a Device),
    Sensor(&'a Sensor),
    ScalarSelector(&'a ScalarSelector),
    Clause(&'a Clause),
    Selection(&'a Selection),
    Function(&'a Function),
    QueryBuilder(&'a QueryBuilder),
}

/// Object types a profile may register a converter for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    DateTime,
    Point,
    Device,
    Sensor,
    ScalarSelector,
    AndClause,
    OrClause,
    Selection,
    Find,
    Interpolation,
    MultiRollup,
    Rollup,
    Aggregation,
    ConvertTz,
    QueryBuilder,
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::DateTime => "datetime",
            NodeKind::Point => "Point",
            NodeKind::Device => "Device",
            NodeKind::Sensor => "Sensor",
            NodeKind::ScalarSelector => "ScalarSelector",
            NodeKind::AndClause => "AndClause",
            NodeKind::OrClause => "OrClause",
            NodeKind::Selection => "Selection",
            NodeKind::Find => "Find",
            NodeKind::Interpolation => "Interpolation",
            NodeKind::MultiRollup => "MultiRollup",
            NodeKind::Rollup => "Rollup",
            NodeKind::Aggregation => "Aggregation",
            NodeKind::ConvertTz => "ConvertTZ",
            NodeKind::QueryBuilder => "QueryBuilder",
        }
    }

    fn of_function(kind: FunctionKind) -> Self {
        match kind {
            FunctionKind::Find => NodeKind::Find,
            FunctionKind::Interpolation => NodeKind::Interpolation,
            FunctionKind::MultiRollup => NodeKind::MultiRollup,
            FunctionKind::Rollup => NodeKind::Rollup,
            FunctionKind::Aggregation => NodeKind::Aggregation,
            FunctionKind::ConvertTz => NodeKind::ConvertTz,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

impl<'a> Node<'a> {
    /// Borrowed string node
    pub fn str(s: &'a str) -> Self {
        Node::Str(Cow::Borrowed(s))
    }

    /// Map node with fixed keys
    pub fn map(entries: Vec<(&'a str, Node<'a>)>) -> Self {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Cow::Borrowed(k), v))
                .collect(),
        )
    }

    /// Domain kind of this node; `None` for plain JSON shapes
    pub fn kind(&self) -> Option<NodeKind> {
        let kind = match self {
            Node::Null
            | Node::Bool(_)
            | Node::Int(_)
            | Node::UInt(_)
            | Node::Float(_)
            | Node::Str(_)
            | Node::List(_)
            | Node::Map(_) => return None,
            Node::DateTime(_) | Node::NaiveDateTime(_) => NodeKind::DateTime,
            Node::Point(_) => NodeKind::Point,
            Node::Device(_) => NodeKind::Device,
            Node::Sensor(_) => NodeKind::Sensor,
            Node::ScalarSelector(_) => NodeKind::ScalarSelector,
            Node::Clause(clause) => match clause.kind {
                ClauseKind::And => NodeKind::AndClause,
                ClauseKind::Or => NodeKind::OrClause,
            },
            Node::Selection(_) => NodeKind::Selection,
            Node::Function(function) => NodeKind::of_function(function.kind),
            Node::QueryBuilder(_) => NodeKind::QueryBuilder,
        };
        Some(kind)
    }

    /// Type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) | Node::UInt(_) => "int",
            Node::Float(_) => "float",
            Node::Str(_) => "str",
            Node::List(_) => "list",
            Node::Map(_) => "map",
            other => other
                .kind()
                .map(|kind| kind.type_name())
                .unwrap_or("unknown"),
        }
    }
}

/// Types that can be handed to an encoder
pub trait Encodable {
    fn to_node(&self) -> Node<'_>;
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn to_node(&self) -> Node<'_> {
        (**self).to_node()
    }
}

impl Encodable for Node<'_> {
    fn to_node(&self) -> Node<'_> {
        self.clone()
    }
}

impl Encodable for bool {
    fn to_node(&self) -> Node<'_> {
        Node::Bool(*self)
    }
}

impl Encodable for i64 {
    fn to_node(&self) -> Node<'_> {
        Node::Int(*self)
    }
}

impl Encodable for i32 {
    fn to_node(&self) -> Node<'_> {
        Node::Int((*self).into())
    }
}

impl Encodable for u32 {
    fn to_node(&self) -> Node<'_> {
        Node::Int((*self).into())
    }
}

impl Encodable for u64 {
    fn to_node(&self) -> Node<'_> {
        Node::UInt(*self)
    }
}

impl Encodable for f64 {
    fn to_node(&self) -> Node<'_> {
        Node::Float(*self)
    }
}

impl Encodable for str {
    fn to_node(&self) -> Node<'_> {
        Node::str(self)
    }
}

impl Encodable for String {
    fn to_node(&self) -> Node<'_> {
        Node::str(self)
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn to_node(&self) -> Node<'_> {
        match self {
            Some(value) => value.to_node(),
            None => Node::Null,
        }
    }
}

impl<T: Encodable> Encodable for [T] {
    fn to_node(&self) -> Node<'_> {
        Node::List(self.iter().map(Encodable::to_node).collect())
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn to_node(&self) -> Node<'_> {
        self.as_slice().to_node()
    }
}

impl<T: Encodable> Encodable for HashMap<String, T> {
    fn to_node(&self) -> Node<'_> {
        Node::Map(
            self.iter()
                .map(|(k, v)| (Cow::Borrowed(k.as_str()), v.to_node()))
                .collect(),
        )
    }
}

impl<T: Encodable> Encodable for BTreeMap<String, T> {
    fn to_node(&self) -> Node<'_> {
        Node::Map(
            self.iter()
                .map(|(k, v)| (Cow::Borrowed(k.as_str()), v.to_node()))
                .collect(),
        )
    }
}

impl Encodable for DateTime<FixedOffset> {
    fn to_node(&self) -> Node<'_> {
        Node::DateTime(*self)
    }
}

impl Encodable for DateTime<Utc> {
    fn to_node(&self) -> Node<'_> {
        Node::DateTime(self.fixed_offset())
    }
}

impl Encodable for NaiveDateTime {
    fn to_node(&self) -> Node<'_> {
        Node::NaiveDateTime(*self)
    }
}

impl Encodable for Arg {
    fn to_node(&self) -> Node<'_> {
        match self {
            Arg::Null => Node::Null,
            Arg::Bool(v) => Node::Bool(*v),
            Arg::Int(v) => Node::Int(*v),
            Arg::UInt(v) => Node::UInt(*v),
            Arg::Float(v) => Node::Float(*v),
            Arg::DateTime(v) => Node::DateTime(*v),
            Arg::Str(v) => Node::str(v),
            Arg::List(items) => items.to_node(),
            Arg::Map(entries) => entries.to_node(),
        }
    }
}

impl Encodable for WriteRequest {
    fn to_node(&self) -> Node<'_> {
        self.data.to_node()
    }
}

macro_rules! domain_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Encodable for $ty {
                fn to_node(&self) -> Node<'_> {
                    Node::$ty(self)
                }
            }
        )*
    };
}

domain_node!(
    Point,
    Device,
    Sensor,
    ScalarSelector,
    Clause,
    Selection,
    Function,
    QueryBuilder,
);
