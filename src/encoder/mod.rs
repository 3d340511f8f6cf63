//! TempoIQ Wire Encoders
//!
//! Converts domain objects into the JSON documents the service expects:
//!
//! - **node**: The `Node` tree and the `Encodable` trait
//! - **profile**: Write, Create and Read converter tables
//! - **serializer**: The `Encoder` walking a tree under one profile
//! - **datetime**: ISO-8601 timestamp rendering
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use tempoiq_wire::encoder::Encoder;
//! use tempoiq_wire::model::{Device, Sensor};
//!
//! let device = Device::new("thermostat.1").with_sensor(Sensor::new("temperature"));
//!
//! // Writes reference devices by key only
//! assert_eq!(Encoder::write().to_string(&device).unwrap(), "\"thermostat.1\"");
//!
//! // Provisioning sends the full definition
//! let json = Encoder::create().encode(&device).unwrap();
//! assert_eq!(json["sensors"][0]["key"], "temperature");
//! ```

pub mod datetime;
pub mod error;
pub mod node;
pub mod profile;
pub mod serializer;

pub use datetime::{isoformat, naive_isoformat};
pub use error::{EncodeError, EncodeResult};
pub use node::{Encodable, Node, NodeKind};
pub use profile::Profile;
pub use serializer::Encoder;
