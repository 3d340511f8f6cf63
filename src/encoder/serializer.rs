//! Profile-driven JSON encoder
//!
//! Walks a `Node` tree, emitting plain JSON shapes directly and handing
//! domain objects to the active profile's converter. Converter output is
//! walked again, so nested objects are resolved by the same rules.

use super::error::{EncodeError, EncodeResult};
use super::node::{Encodable, Node};
use super::profile::Profile;
use serde_json::{Map, Number, Value};
use std::io::Write;

/// Encoder bound to a single profile
///
/// Holds no state beyond its settings and can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    profile: Profile,
    pretty: bool,
}

impl Encoder {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            pretty: false,
        }
    }

    /// Encoder for point submission
    pub fn write() -> Self {
        Self::new(Profile::Write)
    }

    /// Encoder for device provisioning
    pub fn create() -> Self {
        Self::new(Profile::Create)
    }

    /// Encoder for read queries
    pub fn read() -> Self {
        Self::new(Profile::Read)
    }

    /// Builder: pretty-print JSON text output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Encode a value into a JSON tree
    pub fn encode<T: Encodable + ?Sized>(&self, value: &T) -> EncodeResult<Value> {
        let node = value.to_node();
        tracing::debug!(
            profile = %self.profile,
            root = node.type_name(),
            "Encoding document"
        );
        self.encode_node(node)
    }

    /// Encode a value into JSON text
    pub fn to_string<T: Encodable + ?Sized>(&self, value: &T) -> EncodeResult<String> {
        let json = self.encode(value)?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(text)
    }

    /// Encode a value and write the JSON text to `writer`
    pub fn to_writer<W: Write, T: Encodable + ?Sized>(
        &self,
        writer: W,
        value: &T,
    ) -> EncodeResult<()> {
        let json = self.encode(value)?;
        if self.pretty {
            serde_json::to_writer_pretty(writer, &json)?;
        } else {
            serde_json::to_writer(writer, &json)?;
        }
        Ok(())
    }

    /// Encode an already-built node tree
    pub fn encode_node(&self, node: Node<'_>) -> EncodeResult<Value> {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(b)),
            Node::Int(i) => Ok(Value::from(i)),
            Node::UInt(u) => Ok(Value::from(u)),
            Node::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .ok_or(EncodeError::NonFiniteNumber(f)),
            Node::Str(s) => Ok(Value::String(s.into_owned())),
            Node::List(items) => items
                .into_iter()
                .map(|item| self.encode_node(item))
                .collect::<EncodeResult<Vec<_>>>()
                .map(Value::Array),
            Node::Map(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.into_owned(), self.encode_node(value)?);
                }
                Ok(Value::Object(map))
            }
            node => {
                let type_name = node.type_name();
                match node.kind() {
                    Some(kind) if self.profile.handles(kind) => {
                        tracing::trace!(profile = %self.profile, %kind, "Converting object");
                        let converted = self.profile.convert(node)?;
                        self.encode_node(converted)
                    }
                    _ => {
                        tracing::warn!(
                            profile = %self.profile,
                            type_name,
                            "No converter registered for object type"
                        );
                        Err(EncodeError::unsupported(type_name, self.profile))
                    }
                }
            }
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Arg, Device, Point, Sensor, WriteRequest};
    use crate::query::{Clause, Function, Operation, QueryBuilder, ScalarSelector, Selection};
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
    use serde_json::json;

    fn ts(hour: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2015, 1, 1, hour, 0, 0)
            .unwrap()
            .fixed_offset()
    }

    fn thermostat() -> Device {
        Device::new("thermostat.1")
            .name("Living room")
            .attribute("region", "west")
            .with_sensor(Sensor::new("temperature").name("Temperature").attribute("unit", "C"))
            .with_sensor(Sensor::new("humidity").name("Humidity"))
    }

    #[test]
    fn test_point_under_write_and_read() {
        let point = Point::new(ts(0), 12.5);
        let expected = json!({"t": "2015-01-01T00:00:00+00:00", "v": 12.5});

        assert_eq!(Encoder::write().encode(&point).unwrap(), expected);
        assert_eq!(Encoder::read().encode(&point).unwrap(), expected);
    }

    #[test]
    fn test_point_whole_value_is_float() {
        let point = Point::new(ts(0), 5.0);
        assert_eq!(
            Encoder::write().to_string(&point).unwrap(),
            r#"{"t":"2015-01-01T00:00:00+00:00","v":5.0}"#
        );
    }

    #[test]
    fn test_point_offset_with_seconds() {
        let tz = FixedOffset::east_opt(3630).unwrap();
        let point = Point::new(tz.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap(), 1.0);
        let json = Encoder::write().encode(&point).unwrap();
        assert_eq!(json["t"], "2015-01-01T00:00:00+01:00:30");
    }

    #[test]
    fn test_point_keeps_local_offset() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let point = Point::new(tz.with_ymd_and_hms(2015, 6, 1, 9, 30, 0).unwrap(), 1.0);
        let json = Encoder::write().encode(&point).unwrap();
        assert_eq!(json["t"], "2015-06-01T09:30:00+01:00");
    }

    #[test]
    fn test_point_rejected_by_create() {
        let point = Point::new(ts(0), 1.0);
        let err = Encoder::create().encode(&point).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnsupportedType { type_name: "Point", profile: Profile::Create }
        ));
    }

    #[test]
    fn test_datetime_standalone() {
        assert_eq!(
            Encoder::write().encode(&ts(5)).unwrap(),
            json!("2015-01-01T05:00:00+00:00")
        );

        let naive = NaiveDate::from_ymd_opt(2015, 1, 1)
            .unwrap()
            .and_hms_opt(5, 0, 0)
            .unwrap();
        assert_eq!(Encoder::read().encode(&naive).unwrap(), json!("2015-01-01T05:00:00"));

        assert!(Encoder::create().encode(&ts(5)).is_err());
    }

    #[test]
    fn test_device_under_write_is_key() {
        let device = thermostat();
        assert_eq!(Encoder::write().encode(&device).unwrap(), json!("thermostat.1"));
        assert_eq!(
            Encoder::write().encode(&device.sensors[0]).unwrap(),
            json!("temperature")
        );
    }

    #[test]
    fn test_device_under_create() {
        let json = Encoder::create().encode(&thermostat()).unwrap();
        assert_eq!(
            json,
            json!({
                "key": "thermostat.1",
                "name": "Living room",
                "attributes": {"region": "west"},
                "sensors": [
                    {"key": "temperature", "name": "Temperature", "attributes": {"unit": "C"}},
                    {"key": "humidity", "name": "Humidity", "attributes": {}}
                ]
            })
        );
    }

    #[test]
    fn test_device_without_sensors_under_create() {
        let json = Encoder::create().encode(&Device::new("bare")).unwrap();
        assert_eq!(json["sensors"], json!([]));
        assert_eq!(json["attributes"], json!({}));
    }

    #[test]
    fn test_device_rejected_by_read() {
        let err = Encoder::read().encode(&thermostat()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported type: read encoder cannot encode Device"
        );
    }

    #[test]
    fn test_nested_containers_are_walked() {
        let devices = vec![Device::new("a"), Device::new("b")];
        assert_eq!(Encoder::write().encode(&devices).unwrap(), json!(["a", "b"]));

        let points = vec![Some(Point::new(ts(0), 1.0)), None];
        assert_eq!(
            Encoder::write().encode(&points).unwrap(),
            json!([{"t": "2015-01-01T00:00:00+00:00", "v": 1.0}, null])
        );
    }

    #[test]
    fn test_write_request() {
        let request = WriteRequest::new()
            .add("d1", "temp", vec![Point::new(ts(0), 1.0), Point::new(ts(1), 2.0)])
            .add("d2", "humidity", vec![Point::new(ts(0), 40.0)]);

        assert_eq!(
            Encoder::write().encode(&request).unwrap(),
            json!({
                "d1": {"temp": [
                    {"t": "2015-01-01T00:00:00+00:00", "v": 1.0},
                    {"t": "2015-01-01T01:00:00+00:00", "v": 2.0}
                ]},
                "d2": {"humidity": [{"t": "2015-01-01T00:00:00+00:00", "v": 40.0}]}
            })
        );
    }

    #[test]
    fn test_scalar_selector() {
        let selector = ScalarSelector::new("key", "d1");
        assert_eq!(Encoder::read().encode(&selector).unwrap(), json!({"key": "d1"}));
    }

    #[test]
    fn test_and_clause() {
        let clause = Clause::and([ScalarSelector::new("region", "west")]);
        assert_eq!(
            Encoder::read().encode(&clause).unwrap(),
            json!({"and": [{"region": "west"}]})
        );
    }

    #[test]
    fn test_or_clause_preserves_order() {
        let clause = Clause::or([
            ScalarSelector::key("c"),
            ScalarSelector::key("a"),
            ScalarSelector::key("b"),
        ]);
        assert_eq!(
            Encoder::read().encode(&clause).unwrap(),
            json!({"or": [{"key": "c"}, {"key": "a"}, {"key": "b"}]})
        );
    }

    #[test]
    fn test_selection_empty_forms() {
        let encoder = Encoder::read();
        assert_eq!(encoder.encode(&Selection::none()).unwrap(), json!({}));
        assert_eq!(
            encoder.encode(&Selection::of(Clause::or(Vec::new()))).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_selection_delegates_to_clause() {
        let selection = Selection::of(Clause::and([ScalarSelector::attribute("building", "4")]));
        assert_eq!(
            Encoder::read().encode(&selection).unwrap(),
            json!({"and": [{"attributes.building": "4"}]})
        );
    }

    #[test]
    fn test_function_args_pass_through() {
        let function = Function::rollup("mean", "PT1H", ts(0));
        assert_eq!(
            Encoder::read().encode(&function).unwrap(),
            json!({"name": "rollup", "args": ["mean", "PT1H", "2015-01-01T00:00:00+00:00"]})
        );

        let function = Function::multi_rollup(&["min", "max"], "P1D", 0);
        assert_eq!(
            Encoder::read().encode(&function).unwrap(),
            json!({"name": "multi_rollup", "args": [["min", "max"], "P1D", 0]})
        );
    }

    #[test]
    fn test_deserialized_args_encode_unchanged() {
        let function: Function = serde_json::from_str(
            r#"{"kind": "rollup", "args": ["mean", "PT1H", "2015-01-01T00:00:00Z"]}"#,
        )
        .unwrap();
        assert_eq!(
            Encoder::read().encode(&function).unwrap(),
            json!({"name": "rollup", "args": ["mean", "PT1H", "2015-01-01T00:00:00Z"]})
        );

        let selector: ScalarSelector = serde_json::from_str(
            r#"{"key": "attributes.installed", "value": "2015-01-01T00:00:00.000000001Z"}"#,
        )
        .unwrap();
        assert_eq!(
            Encoder::read().to_string(&selector).unwrap(),
            r#"{"attributes.installed":"2015-01-01T00:00:00.000000001Z"}"#
        );
    }

    #[test]
    fn test_large_integer_args() {
        let function: Function =
            serde_json::from_str(r#"{"kind": "find", "args": [18446744073709551615]}"#).unwrap();
        assert_eq!(
            Encoder::read().to_string(&function).unwrap(),
            r#"{"args":[18446744073709551615],"name":"find"}"#
        );
    }

    #[test]
    fn test_query_without_pipeline() {
        let query = QueryBuilder::devices()
            .operation(Operation::new("read", vec![Arg::from(ts(0)), Arg::from(ts(1))]));

        let json = Encoder::read().encode(&query).unwrap();
        assert_eq!(
            json,
            json!({
                "search": {
                    "select": "devices",
                    "filters": {"devices": {}, "sensors": {}}
                },
                "read": ["2015-01-01T00:00:00+00:00", "2015-01-01T01:00:00+00:00"]
            })
        );
        assert!(json.get("fold").is_none());
    }

    #[test]
    fn test_query_with_pipeline() {
        let query = QueryBuilder::sensors()
            .filter_devices(Clause::and([ScalarSelector::attribute("region", "west")]))
            .filter_sensors(Clause::or([
                ScalarSelector::key("temperature"),
                ScalarSelector::key("humidity"),
            ]))
            .read(ts(0), ts(12))
            .pipe(Function::rollup("mean", "PT1H", ts(0)))
            .pipe(Function::aggregate("sum"));

        assert_eq!(
            Encoder::read().encode(&query).unwrap(),
            json!({
                "search": {
                    "select": "sensors",
                    "filters": {
                        "devices": {"and": [{"attributes.region": "west"}]},
                        "sensors": {"or": [{"key": "temperature"}, {"key": "humidity"}]}
                    }
                },
                "read": {
                    "start": "2015-01-01T00:00:00+00:00",
                    "stop": "2015-01-01T12:00:00+00:00"
                },
                "fold": {
                    "functions": [
                        {"name": "rollup", "args": ["mean", "PT1H", "2015-01-01T00:00:00+00:00"]},
                        {"name": "aggregation", "args": ["sum"]}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_query_operation_variants() {
        let encoder = Encoder::read();

        let json = encoder.encode(&QueryBuilder::devices()).unwrap();
        assert_eq!(json["find"], json!({"quantifier": "all"}));

        let json = encoder.encode(&QueryBuilder::devices().latest()).unwrap();
        assert_eq!(json["single"], json!({"function": "latest"}));

        let json = encoder.encode(&QueryBuilder::devices().delete()).unwrap();
        assert_eq!(json["delete"], json!({}));
    }

    #[test]
    fn test_query_operation_key_collisions() {
        let encoder = Encoder::read();

        let query = QueryBuilder::devices().operation(Operation::new("search", Arg::map([("x", 1)])));
        let json = encoder.encode(&query).unwrap();
        assert_eq!(json, json!({"search": {"x": 1}}));

        let query = QueryBuilder::devices().operation(Operation::new("fold", Arg::map([("x", 1)])));
        let json = encoder.encode(&query).unwrap();
        assert_eq!(json["fold"], json!({"x": 1}));

        let query = QueryBuilder::devices()
            .operation(Operation::new("fold", Arg::map([("x", 1)])))
            .pipe(Function::aggregate("sum"));
        let json = encoder.encode(&query).unwrap();
        assert_eq!(
            json["fold"],
            json!({"functions": [{"name": "aggregation", "args": ["sum"]}]})
        );
        assert_eq!(json["search"]["select"], "devices");
    }

    #[test]
    fn test_query_rejected_by_write() {
        let err = Encoder::write().encode(&QueryBuilder::devices()).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnsupportedType { type_name: "QueryBuilder", profile: Profile::Write }
        ));
    }

    #[test]
    fn test_unsupported_type_nested_in_container() {
        let sensor = Sensor::new("s");
        let values = vec![Node::Int(1), Node::Sensor(&sensor)];
        let err = Encoder::read().encode(&values).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnsupportedType { type_name: "Sensor", .. }
        ));
    }

    #[test]
    fn test_non_finite_value() {
        let point = Point::new(ts(0), f64::NAN);
        let err = Encoder::write().encode(&point).unwrap_err();
        assert!(matches!(err, EncodeError::NonFiniteNumber(_)));
    }

    #[test]
    fn test_to_string_compact_and_pretty() {
        let selector = ScalarSelector::key("d1");
        assert_eq!(Encoder::read().to_string(&selector).unwrap(), r#"{"key":"d1"}"#);
        assert_eq!(
            Encoder::read().pretty(true).to_string(&selector).unwrap(),
            "{\n  \"key\": \"d1\"\n}"
        );
    }

    #[test]
    fn test_to_writer() {
        let mut buf = Vec::new();
        Encoder::write()
            .to_writer(&mut buf, &Device::new("d1"))
            .unwrap();
        assert_eq!(buf, b"\"d1\"");
    }

    #[test]
    fn test_encoder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Encoder>();

        let encoder = Encoder::write();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    encoder
                        .encode(&Device::new(format!("d{}", i)))
                        .unwrap()
                })
            })
            .collect();
        let keys: Vec<Value> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(keys, vec![json!("d0"), json!("d1"), json!("d2"), json!("d3")]);
    }
}
