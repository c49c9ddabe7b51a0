//! Filter stages that cut a feed down while keeping it referentially closed.
//!
//! Each stage picks its root records (stops in a box, calendars in a date
//! range, routes of some modes) and derives every record that depends on
//! them. The result is a [`FilteredGraph`] wrapping the stage's input, which
//! can in turn be the input of the next stage.
//!
//! ```
//! use gtfs_filter::prelude::*;
//!
//! # fn main() -> Result<(), gtfs_filter::filter::Error> {
//! let feed = Repository::new();
//! let bus_only = ModeFilter::new([3])?.apply(feed);
//! assert!(bus_only.routes().is_empty());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use thiserror::Error;

mod chain;
pub mod closure;
mod location;
mod mode;
mod stage;
mod timespan;
pub use chain::*;
pub use location::*;
pub use mode::*;
pub use stage::*;
pub use timespan::*;

use crate::{graph::EntityGraph, shared::ServiceDate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Mode filter needs at least one transport mode")]
    EmptyModeSet,
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: ServiceDate, end: ServiceDate },
    #[error("Unknown transport mode: {0}")]
    UnknownMode(String),
    #[error("Chain already has a {0} stage")]
    DuplicateStage(FilterKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Location,
    Timespan,
    Mode,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Location => "Location",
            Self::Timespan => "Timespan",
            Self::Mode => "Mode",
        })
    }
}

/// A filter stage.
///
/// `derive` computes the replacement tables from the stage's input; `apply`
/// wraps the input with them. Stages are plain parameter holders, so one
/// filter can be applied to any number of graphs.
pub trait Filter: fmt::Debug + Send + Sync {
    fn kind(&self) -> FilterKind;

    fn derive(&self, input: &dyn EntityGraph) -> Overrides;

    fn apply<G: EntityGraph>(&self, input: G) -> FilteredGraph<G>
    where
        Self: Sized,
    {
        stage::build(self.kind(), input, |input| self.derive(input))
    }
}
