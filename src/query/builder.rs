//! Query builder
//!
//! Assembles a search (which objects), an operation (what to do with them)
//! and an optional pipeline of functions into one read request.

use super::function::{Function, Operation};
use super::selection::{Clause, Selection, Selections};
use crate::model::Arg;
use serde::Deserialize;

/// A complete read request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryBuilder {
    /// Category being searched, e.g. `devices` or `sensors`
    pub object_type: String,
    /// Filters per object category
    #[serde(default)]
    pub selection: Selections,
    /// Action applied to the matched objects
    #[serde(default)]
    pub operation: Operation,
    /// Functions applied to the result, in order
    #[serde(default)]
    pub pipeline: Vec<Function>,
}

impl QueryBuilder {
    /// Start a query over an object category
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            selection: Selections::default(),
            operation: Operation::default(),
            pipeline: Vec::new(),
        }
    }

    /// Search devices
    pub fn devices() -> Self {
        Self::new("devices")
    }

    /// Search sensors
    pub fn sensors() -> Self {
        Self::new("sensors")
    }

    /// Builder: restrict matched devices
    pub fn filter_devices(mut self, clause: Clause) -> Self {
        self.selection.devices = Selection::of(clause);
        self
    }

    /// Builder: restrict matched sensors
    pub fn filter_sensors(mut self, clause: Clause) -> Self {
        self.selection.sensors = Selection::of(clause);
        self
    }

    /// Builder: set the operation directly
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Builder: read points in `[start, stop)`
    pub fn read(self, start: impl Into<Arg>, stop: impl Into<Arg>) -> Self {
        self.operation(Operation::read(start, stop))
    }

    /// Builder: read the most recent point per stream
    pub fn latest(self) -> Self {
        self.operation(Operation::latest())
    }

    /// Builder: read one point per stream around a timestamp
    pub fn single(self, function: &str, timestamp: impl Into<Arg>) -> Self {
        self.operation(Operation::single(function, timestamp))
    }

    /// Builder: delete the matched objects
    pub fn delete(self) -> Self {
        self.operation(Operation::delete())
    }

    /// Builder: append a pipeline function
    pub fn pipe(mut self, function: Function) -> Self {
        self.pipeline.push(function);
        self
    }

    /// Selection for a category name, if the category is known
    pub fn selection_for(&self, category: &str) -> Option<&Selection> {
        match category {
            "devices" => Some(&self.selection.devices),
            "sensors" => Some(&self.selection.sensors),
            _ => None,
        }
    }
}
