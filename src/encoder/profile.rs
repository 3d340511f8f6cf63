//! Encoding profiles
//!
//! A profile is a fixed table of the object types it accepts plus the
//! converter used for each. Three profiles exist, one per request family:
//!
//! | Profile  | Registered types                                              |
//! |----------|---------------------------------------------------------------|
//! | `Write`  | Device, Sensor, Point, datetime                               |
//! | `Create` | Device, Sensor                                                |
//! | `Read`   | Point, datetime, ScalarSelector, AndClause, OrClause,         |
//! |          | Selection, QueryBuilder, all pipeline function variants       |
//!
//! Converters map one node to another node; the encoder keeps walking the
//! result, so a converter may emit nested domain objects (a device's
//! sensors, a query's selections) and leave them to their own converter.

use super::datetime::{isoformat, naive_isoformat};
use super::error::{EncodeError, EncodeResult};
use super::node::{Encodable, Node, NodeKind};
use crate::model::{Device, Point, Sensor};
use crate::query::{Clause, Function, QueryBuilder, ScalarSelector, Selection};
use std::borrow::Cow;

/// Serialization contract for one request family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Point submission; devices and sensors are referenced by key
    Write,
    /// Device provisioning with full metadata
    Create,
    /// Search and read queries
    Read,
}

const WRITE_REGISTRY: &[NodeKind] = &[
    NodeKind::Device,
    NodeKind::Sensor,
    NodeKind::Point,
    NodeKind::DateTime,
];

const CREATE_REGISTRY: &[NodeKind] = &[NodeKind::Device, NodeKind::Sensor];

const READ_REGISTRY: &[NodeKind] = &[
    NodeKind::Point,
    NodeKind::DateTime,
    NodeKind::ScalarSelector,
    NodeKind::AndClause,
    NodeKind::OrClause,
    NodeKind::QueryBuilder,
    NodeKind::Selection,
    NodeKind::Find,
    NodeKind::Interpolation,
    NodeKind::MultiRollup,
    NodeKind::Rollup,
    NodeKind::Aggregation,
    NodeKind::ConvertTz,
];

impl Profile {
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Write => "write",
            Profile::Create => "create",
            Profile::Read => "read",
        }
    }

    pub fn all() -> &'static [Profile] {
        &[Profile::Write, Profile::Create, Profile::Read]
    }

    /// Object types this profile has converters for
    pub fn registry(&self) -> &'static [NodeKind] {
        match self {
            Profile::Write => WRITE_REGISTRY,
            Profile::Create => CREATE_REGISTRY,
            Profile::Read => READ_REGISTRY,
        }
    }

    pub fn handles(&self, kind: NodeKind) -> bool {
        self.registry().contains(&kind)
    }

    /// Apply this profile's converter to a domain node
    pub(crate) fn convert<'a>(&self, node: Node<'a>) -> EncodeResult<Node<'a>> {
        use Profile::*;

        let converted = match (*self, node) {
            (Write | Read, Node::DateTime(dt)) => Node::Str(Cow::Owned(isoformat(&dt))),
            (Write | Read, Node::NaiveDateTime(dt)) => Node::Str(Cow::Owned(naive_isoformat(&dt))),
            (Write | Read, Node::Point(point)) => encode_point(point),
            (Write, Node::Device(device)) => Node::str(&device.key),
            (Write, Node::Sensor(sensor)) => Node::str(&sensor.key),
            (Create, Node::Device(device)) => encode_device(device),
            (Create, Node::Sensor(sensor)) => encode_sensor(sensor),
            (Read, Node::ScalarSelector(selector)) => encode_scalar_selector(selector),
            (Read, Node::Clause(clause)) => encode_compound_clause(clause),
            (Read, Node::Selection(selection)) => encode_selection(selection),
            (Read, Node::Function(function)) => encode_function(function),
            (Read, Node::QueryBuilder(query)) => encode_query(query),
            (profile, other) => {
                return Err(EncodeError::unsupported(other.type_name(), profile));
            }
        };
        Ok(converted)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn encode_point(point: &Point) -> Node<'_> {
    Node::map(vec![
        ("t", Node::DateTime(point.timestamp)),
        ("v", Node::Float(point.value)),
    ])
}

fn encode_sensor(sensor: &Sensor) -> Node<'_> {
    Node::map(vec![
        ("key", Node::str(&sensor.key)),
        ("name", Node::str(&sensor.name)),
        ("attributes", sensor.attributes.to_node()),
    ])
}

fn encode_device(device: &Device) -> Node<'_> {
    Node::map(vec![
        ("key", Node::str(&device.key)),
        ("name", Node::str(&device.name)),
        ("attributes", device.attributes.to_node()),
        ("sensors", device.sensors.to_node()),
    ])
}

fn encode_scalar_selector(selector: &ScalarSelector) -> Node<'_> {
    Node::Map(vec![(
        Cow::Borrowed(selector.key.as_str()),
        selector.value.to_node(),
    )])
}

fn encode_compound_clause(clause: &Clause) -> Node<'_> {
    Node::map(vec![(clause.kind.wire_key(), clause.selectors.to_node())])
}

fn encode_selection(selection: &Selection) -> Node<'_> {
    match &selection.clause {
        Some(clause) if !clause.is_empty() => Node::Clause(clause),
        _ => Node::Map(Vec::new()),
    }
}

fn encode_function(function: &Function) -> Node<'_> {
    Node::map(vec![
        ("name", Node::str(function.name())),
        ("args", function.args.to_node()),
    ])
}

fn encode_query(query: &QueryBuilder) -> Node<'_> {
    let search = Node::map(vec![
        ("select", Node::str(&query.object_type)),
        (
            "filters",
            Node::map(vec![
                ("devices", Node::Selection(&query.selection.devices)),
                ("sensors", Node::Selection(&query.selection.sensors)),
            ]),
        ),
    ]);

    // The operation is flattened to `name: args`; pipeline functions keep
    // their `{name, args}` wrapping.
    let mut entries = vec![
        (Cow::Borrowed("search"), search),
        (
            Cow::Borrowed(query.operation.name.as_str()),
            query.operation.args.to_node(),
        ),
    ];

    if !query.pipeline.is_empty() {
        entries.push((
            Cow::Borrowed("fold"),
            Node::map(vec![("functions", query.pipeline.to_node())]),
        ));
    }

    Node::Map(entries)
}
