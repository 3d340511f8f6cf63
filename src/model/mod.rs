//! Domain objects carried by the wire encoders
//!
//! - **types**: Points, devices, sensors and argument values
//! - **write_request**: Batches of points keyed by device and sensor

pub mod types;
pub mod write_request;

pub use types::{Arg, Device, Point, Sensor};
pub use write_request::WriteRequest;
