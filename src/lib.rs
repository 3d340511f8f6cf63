//! # TempoIQ Wire
//!
//! Encoders that turn time-series domain objects into the JSON request
//! bodies understood by the TempoIQ service.
//!
//! ## Profiles
//!
//! - **Write**: points for submission; devices and sensors by key
//! - **Create**: full device and sensor definitions for provisioning
//! - **Read**: search filters, operations and pipeline functions
//!
//! ## Modules
//!
//! - [`model`]: Points, devices, sensors and write batches
//! - [`query`]: Selectors, clauses, functions and the query builder
//! - [`encoder`]: Profile dispatch and JSON output
//! - [`config`]: File and environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use tempoiq_wire::{Clause, Encoder, Function, QueryBuilder, ScalarSelector};
//!
//! let query = QueryBuilder::devices()
//!     .filter_devices(Clause::and([ScalarSelector::attribute("region", "west")]))
//!     .read("2015-01-01T00:00:00Z", "2015-01-02T00:00:00Z")
//!     .pipe(Function::rollup("mean", "PT1H", "2015-01-01T00:00:00Z"));
//!
//! let body = Encoder::read().encode(&query).unwrap();
//! assert_eq!(body["search"]["select"], "devices");
//! assert_eq!(body["fold"]["functions"][0]["name"], "rollup");
//! ```

pub mod config;
pub mod encoder;
pub mod model;
pub mod query;

// Re-export top-level types for convenience
pub use encoder::{EncodeError, EncodeResult, Encodable, Encoder, Node, NodeKind, Profile};

pub use model::{Arg, Device, Point, Sensor, WriteRequest};

pub use query::{
    Clause, ClauseKind, Function, FunctionKind, Operation, QueryBuilder, ScalarSelector,
    Selection, Selections,
};

pub use config::{generate_default_config, Config, ConfigError, EncoderConfig, LoggingConfig};
