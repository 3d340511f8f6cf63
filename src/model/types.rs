//! Core data types for the TempoIQ wire layer
//!
//! This module defines the fundamental objects handed to the encoders:
//! - `Point`: A single timestamped measurement
//! - `Sensor`: A named stream of points on a device
//! - `Device`: A physical or logical source owning sensors
//! - `Arg`: Loosely typed values used by selectors and pipeline functions

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// A single time-series data point
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Point {
    /// When the measurement was taken
    pub timestamp: DateTime<FixedOffset>,
    /// The measured value
    ///
    /// Always encoded as a JSON float, so a whole value such as `5` goes
    /// out as `5.0`.
    pub value: f64,
}

impl Point {
    /// Create a point at a specific time
    pub fn new(timestamp: DateTime<FixedOffset>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Create a point from a UTC timestamp
    pub fn utc(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp: timestamp.fixed_offset(),
            value,
        }
    }

    /// Create a point stamped with the current time
    pub fn now(value: f64) -> Self {
        Self::utc(Utc::now(), value)
    }
}

/// A sensor attached to a device
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sensor {
    /// Unique key within the owning device
    pub key: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Free-form metadata used for filtering
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Sensor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: String::new(),
            attributes: HashMap::new(),
        }
    }

    /// Builder: set name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder: add an attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A device and the sensors it carries
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Device {
    /// Globally unique device key
    pub key: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Free-form metadata used for filtering
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Sensors in declaration order
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

impl Device {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: String::new(),
            attributes: HashMap::new(),
            sensors: Vec::new(),
        }
    }

    /// Builder: set name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder: add an attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: append a sensor
    pub fn with_sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.push(sensor);
        self
    }

    /// Look up a sensor by key
    pub fn sensor(&self, key: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.key == key)
    }
}

/// A JSON-shaped argument value
///
/// Selector values and function arguments are passed through to the wire
/// as-is, except that datetimes are rendered in ISO-8601 form. Datetimes
/// only come from Rust callers: deserialized strings always stay strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`
    UInt(u64),
    Float(f64),
    #[serde(skip_deserializing)]
    DateTime(DateTime<FixedOffset>),
    Str(String),
    List(Vec<Arg>),
    Map(BTreeMap<String, Arg>),
}

impl Arg {
    /// Build a map argument from key/value pairs
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Arg>,
    {
        Arg::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<u64> for Arg {
    fn from(v: u64) -> Self {
        i64::try_from(v).map(Arg::Int).unwrap_or(Arg::UInt(v))
    }
}

impl From<i32> for Arg {
    fn from(v: i32) -> Self {
        Arg::Int(v.into())
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<DateTime<FixedOffset>> for Arg {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Arg::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(v: DateTime<Utc>) -> Self {
        Arg::DateTime(v.fixed_offset())
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        Arg::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Arg::Null)
    }
}
