//! Write request batching
//!
//! Groups points by device and sensor so a single request body can carry
//! data for many streams:
//!
//! ```text
//! { "<device key>": { "<sensor key>": [ {"t": ..., "v": ...}, ... ] } }
//! ```

use super::types::{Device, Point, Sensor};
use std::collections::BTreeMap;

/// Points to submit, keyed by device key then sensor key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteRequest {
    pub(crate) data: BTreeMap<String, BTreeMap<String, Vec<Point>>>,
}

impl WriteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append points for a device/sensor pair
    ///
    /// Points for a pair that already exists are appended after the existing ones.
    pub fn add(
        mut self,
        device: impl Into<String>,
        sensor: impl Into<String>,
        points: impl IntoIterator<Item = Point>,
    ) -> Self {
        self.push(device, sensor, points);
        self
    }

    /// Builder: append points for a sensor of a known device
    pub fn add_for(
        self,
        device: &Device,
        sensor: &Sensor,
        points: impl IntoIterator<Item = Point>,
    ) -> Self {
        self.add(device.key.as_str(), sensor.key.as_str(), points)
    }

    /// Append points in place
    pub fn push(
        &mut self,
        device: impl Into<String>,
        sensor: impl Into<String>,
        points: impl IntoIterator<Item = Point>,
    ) {
        self.data
            .entry(device.into())
            .or_default()
            .entry(sensor.into())
            .or_default()
            .extend(points);
    }

    /// Points recorded for a device/sensor pair
    pub fn points(&self, device: &str, sensor: &str) -> Option<&[Point]> {
        self.data
            .get(device)
            .and_then(|sensors| sensors.get(sensor))
            .map(Vec::as_slice)
    }

    /// Number of distinct devices in the request
    pub fn device_count(&self) -> usize {
        self.data.len()
    }

    /// Total number of points across all streams
    pub fn point_count(&self) -> usize {
        self.data
            .values()
            .flat_map(|sensors| sensors.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}
