//! Cut a GTFS feed down to a referentially consistent subset.
//!
//! A feed is read into a [`repository::Repository`], passed through one or
//! more [`filter`] stages and written back out with [`gtfs::GtfsWriter`].

pub mod filter;
pub mod graph;
pub mod gtfs;
pub mod repository;
pub mod shared;

pub mod prelude {
    pub use crate::filter::{
        BoundingBox, DateRange, Filter, FilterChain, FilterKind, FilteredGraph, LocationFilter,
        ModeFilter, TimespanFilter, TransportMode,
    };
    pub use crate::graph::{Entities, Entity, EntityGraph, EntityGraphExt, EntityType, Table};
    pub use crate::gtfs::{Config, GtfsReader, GtfsWriter};
    pub use crate::repository::*;
    pub use crate::shared::{AgencyAndId, Coordinate, ServiceDate, Time};
}
