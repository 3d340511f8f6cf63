//! TempoIQ Query Model
//!
//! Structures describing a read request before it is encoded:
//!
//! - **selection**: Scalar selectors, AND/OR clauses and per-category selections
//! - **function**: Operations and pipeline functions
//! - **builder**: The `QueryBuilder` tying search, operation and pipeline together
//!
//! # Example
//!
//! ```rust
//! use tempoiq_wire::query::{Clause, Function, QueryBuilder, ScalarSelector};
//!
//! let query = QueryBuilder::devices()
//!     .filter_devices(Clause::and([ScalarSelector::attribute("region", "west")]))
//!     .read("2015-01-01T00:00:00Z", "2015-01-02T00:00:00Z")
//!     .pipe(Function::rollup("mean", "PT1H", "2015-01-01T00:00:00Z"));
//!
//! assert_eq!(query.pipeline.len(), 1);
//! ```

mod builder;
mod function;
mod selection;

pub use builder::QueryBuilder;
pub use function::{Function, FunctionKind, Operation};
pub use selection::{Clause, ClauseKind, ScalarSelector, Selection, Selections};
