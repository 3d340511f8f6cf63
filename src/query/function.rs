//! Query operations and pipeline functions
//!
//! The operation decides what a query does with the objects it found
//! (read a range, take a single value, delete). Pipeline functions are
//! applied server-side to the result, left to right.

use crate::model::Arg;
use serde::Deserialize;

/// Pipeline stage variants understood by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// Locate points matching a fold within each period
    Find,
    /// Fill in values at fixed intervals
    #[serde(rename = "interpolate")]
    Interpolation,
    /// Several rollups over the same period
    MultiRollup,
    /// Downsample each stream by a fold over fixed periods
    Rollup,
    /// Combine streams point-wise with a fold
    Aggregation,
    /// Shift timestamps into another timezone
    #[serde(rename = "convert_tz")]
    ConvertTz,
}

impl FunctionKind {
    /// Name of the function on the wire
    pub fn wire_name(&self) -> &'static str {
        match self {
            FunctionKind::Find => "find",
            FunctionKind::Interpolation => "interpolate",
            FunctionKind::MultiRollup => "multi_rollup",
            FunctionKind::Rollup => "rollup",
            FunctionKind::Aggregation => "aggregation",
            FunctionKind::ConvertTz => "convert_tz",
        }
    }

    pub fn all() -> &'static [FunctionKind] {
        &[
            FunctionKind::Find,
            FunctionKind::Interpolation,
            FunctionKind::MultiRollup,
            FunctionKind::Rollup,
            FunctionKind::Aggregation,
            FunctionKind::ConvertTz,
        ]
    }
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A pipeline stage
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Function {
    pub kind: FunctionKind,
    #[serde(default)]
    pub args: Vec<Arg>,
}

impl Function {
    pub fn new(kind: FunctionKind, args: Vec<Arg>) -> Self {
        Self { kind, args }
    }

    pub fn name(&self) -> &'static str {
        self.kind.wire_name()
    }

    /// `rollup(fold, period, start)`
    pub fn rollup(fold: &str, period: &str, start: impl Into<Arg>) -> Self {
        Self::new(
            FunctionKind::Rollup,
            vec![fold.into(), period.into(), start.into()],
        )
    }

    /// `multi_rollup([folds], period, start)`
    pub fn multi_rollup(folds: &[&str], period: &str, start: impl Into<Arg>) -> Self {
        Self::new(
            FunctionKind::MultiRollup,
            vec![folds.to_vec().into(), period.into(), start.into()],
        )
    }

    /// `interpolate(function, period, start, end)`
    pub fn interpolate(
        function: &str,
        period: &str,
        start: impl Into<Arg>,
        end: impl Into<Arg>,
    ) -> Self {
        Self::new(
            FunctionKind::Interpolation,
            vec![function.into(), period.into(), start.into(), end.into()],
        )
    }

    /// `aggregation(fold)`
    pub fn aggregate(fold: &str) -> Self {
        Self::new(FunctionKind::Aggregation, vec![fold.into()])
    }

    /// `find(function, period, start)`
    pub fn find(function: &str, period: &str, start: impl Into<Arg>) -> Self {
        Self::new(
            FunctionKind::Find,
            vec![function.into(), period.into(), start.into()],
        )
    }

    /// `convert_tz(tz)`
    pub fn convert_tz(tz: &str) -> Self {
        Self::new(FunctionKind::ConvertTz, vec![tz.into()])
    }
}

/// The action a query performs
///
/// Emitted as a top-level `"<name>": <args>` entry of the query document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default = "empty_args")]
    pub args: Arg,
}

fn empty_args() -> Arg {
    Arg::Map(Default::default())
}

impl Operation {
    pub fn new(name: impl Into<String>, args: impl Into<Arg>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }

    /// Return every matching object
    pub fn find() -> Self {
        Self::new("find", Arg::map([("quantifier", "all")]))
    }

    /// Read points in `[start, stop)`
    pub fn read(start: impl Into<Arg>, stop: impl Into<Arg>) -> Self {
        let start: Arg = start.into();
        let stop: Arg = stop.into();
        Self::new("read", Arg::map([("start", start), ("stop", stop)]))
    }

    /// Read a single point per stream selected by `function` around `timestamp`
    pub fn single(function: &str, timestamp: impl Into<Arg>) -> Self {
        let args = Arg::map([
            ("function", Arg::from(function)),
            ("timestamp", timestamp.into()),
        ]);
        Self::new("single", args)
    }

    /// Read the most recent point per stream
    pub fn latest() -> Self {
        Self::new("single", Arg::map([("function", "latest")]))
    }

    /// Delete the matched objects
    pub fn delete() -> Self {
        Self::new("delete", empty_args())
    }
}

impl Default for Operation {
    fn default() -> Self {
        Self::find()
    }
}
