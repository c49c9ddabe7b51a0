//! The read-only view every feed source and every filter stage exposes.

use std::sync::Arc;

use thiserror::Error;

mod entity;
mod table;
pub use entity::*;
pub use table::*;

use crate::{
    repository::{
        Agency, FareAttribute, FareRule, Frequency, Pathway, Route, ServiceCalendar,
        ServiceCalendarDate, ShapePoint, Stop, StopTime, Transfer, Trip,
    },
    shared::AgencyAndId,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),
}

/// Accessors over a complete, materialized feed.
///
/// Plural accessors return every record of a kind in a stable order, singular
/// ones look a record up by its key and return `None` on a miss.
pub trait EntityGraph: Send + Sync {
    fn agencies(&self) -> &[Arc<Agency>];
    fn agency(&self, id: &str) -> Option<&Arc<Agency>>;

    fn routes(&self) -> &[Arc<Route>];
    fn route(&self, id: &AgencyAndId) -> Option<&Arc<Route>>;

    fn stops(&self) -> &[Arc<Stop>];
    fn stop(&self, id: &AgencyAndId) -> Option<&Arc<Stop>>;

    fn trips(&self) -> &[Arc<Trip>];
    fn trip(&self, id: &AgencyAndId) -> Option<&Arc<Trip>>;

    fn stop_times(&self) -> &[Arc<StopTime>];
    fn stop_time(&self, id: u32) -> Option<&Arc<StopTime>>;

    fn calendars(&self) -> &[Arc<ServiceCalendar>];
    fn calendar(&self, id: u32) -> Option<&Arc<ServiceCalendar>>;

    fn calendar_dates(&self) -> &[Arc<ServiceCalendarDate>];
    fn calendar_date(&self, id: u32) -> Option<&Arc<ServiceCalendarDate>>;

    fn shape_points(&self) -> &[Arc<ShapePoint>];
    fn shape_point(&self, id: u32) -> Option<&Arc<ShapePoint>>;

    fn frequencies(&self) -> &[Arc<Frequency>];
    fn frequency(&self, id: u32) -> Option<&Arc<Frequency>>;

    fn transfers(&self) -> &[Arc<Transfer>];
    fn transfer(&self, id: u32) -> Option<&Arc<Transfer>>;

    fn fare_attributes(&self) -> &[Arc<FareAttribute>];
    fn fare_attribute(&self, id: &AgencyAndId) -> Option<&Arc<FareAttribute>>;

    fn fare_rules(&self) -> &[Arc<FareRule>];
    fn fare_rule(&self, id: u32) -> Option<&Arc<FareRule>>;

    fn pathways(&self) -> &[Arc<Pathway>];
    fn pathway(&self, id: &AgencyAndId) -> Option<&Arc<Pathway>>;

    /// Every record of `kind`, type-erased.
    fn entities(&self, kind: EntityType) -> Entities<'_> {
        match kind {
            EntityType::Agency => Entities::Agencies(self.agencies()),
            EntityType::ShapePoint => Entities::ShapePoints(self.shape_points()),
            EntityType::Route => Entities::Routes(self.routes()),
            EntityType::Stop => Entities::Stops(self.stops()),
            EntityType::Trip => Entities::Trips(self.trips()),
            EntityType::StopTime => Entities::StopTimes(self.stop_times()),
            EntityType::ServiceCalendar => Entities::Calendars(self.calendars()),
            EntityType::ServiceCalendarDate => Entities::CalendarDates(self.calendar_dates()),
            EntityType::FareAttribute => Entities::FareAttributes(self.fare_attributes()),
            EntityType::FareRule => Entities::FareRules(self.fare_rules()),
            EntityType::Frequency => Entities::Frequencies(self.frequencies()),
            EntityType::Pathway => Entities::Pathways(self.pathways()),
            EntityType::Transfer => Entities::Transfers(self.transfers()),
        }
    }

    /// Same as [`EntityGraph::entities`], keyed by a type or file name.
    fn entities_for_type_name(&self, name: &str) -> Result<Entities<'_>, Error> {
        let kind: EntityType = name.parse()?;
        Ok(self.entities(kind))
    }
}

/// Generic accessors, `graph.all::<Stop>()` and `graph.get::<Trip>(&id)`.
pub trait EntityGraphExt: EntityGraph {
    fn all<T: Entity>(&self) -> &[Arc<T>] {
        T::all_in(self)
    }

    fn get<T: Entity>(&self, key: &T::Key) -> Option<&Arc<T>> {
        T::find_in(self, key)
    }
}

impl<G: EntityGraph + ?Sized> EntityGraphExt for G {}

macro_rules! forward_entity_graph {
    ($target:ty) => {
        impl<G: EntityGraph + ?Sized> EntityGraph for $target {
            fn agencies(&self) -> &[Arc<Agency>] {
                (**self).agencies()
            }

            fn agency(&self, id: &str) -> Option<&Arc<Agency>> {
                (**self).agency(id)
            }

            fn routes(&self) -> &[Arc<Route>] {
                (**self).routes()
            }

            fn route(&self, id: &AgencyAndId) -> Option<&Arc<Route>> {
                (**self).route(id)
            }

            fn stops(&self) -> &[Arc<Stop>] {
                (**self).stops()
            }

            fn stop(&self, id: &AgencyAndId) -> Option<&Arc<Stop>> {
                (**self).stop(id)
            }

            fn trips(&self) -> &[Arc<Trip>] {
                (**self).trips()
            }

            fn trip(&self, id: &AgencyAndId) -> Option<&Arc<Trip>> {
                (**self).trip(id)
            }

            fn stop_times(&self) -> &[Arc<StopTime>] {
                (**self).stop_times()
            }

            fn stop_time(&self, id: u32) -> Option<&Arc<StopTime>> {
                (**self).stop_time(id)
            }

            fn calendars(&self) -> &[Arc<ServiceCalendar>] {
                (**self).calendars()
            }

            fn calendar(&self, id: u32) -> Option<&Arc<ServiceCalendar>> {
                (**self).calendar(id)
            }

            fn calendar_dates(&self) -> &[Arc<ServiceCalendarDate>] {
                (**self).calendar_dates()
            }

            fn calendar_date(&self, id: u32) -> Option<&Arc<ServiceCalendarDate>> {
                (**self).calendar_date(id)
            }

            fn shape_points(&self) -> &[Arc<ShapePoint>] {
                (**self).shape_points()
            }

            fn shape_point(&self, id: u32) -> Option<&Arc<ShapePoint>> {
                (**self).shape_point(id)
            }

            fn frequencies(&self) -> &[Arc<Frequency>] {
                (**self).frequencies()
            }

            fn frequency(&self, id: u32) -> Option<&Arc<Frequency>> {
                (**self).frequency(id)
            }

            fn transfers(&self) -> &[Arc<Transfer>] {
                (**self).transfers()
            }

            fn transfer(&self, id: u32) -> Option<&Arc<Transfer>> {
                (**self).transfer(id)
            }

            fn fare_attributes(&self) -> &[Arc<FareAttribute>] {
                (**self).fare_attributes()
            }

            fn fare_attribute(&self, id: &AgencyAndId) -> Option<&Arc<FareAttribute>> {
                (**self).fare_attribute(id)
            }

            fn fare_rules(&self) -> &[Arc<FareRule>] {
                (**self).fare_rules()
            }

            fn fare_rule(&self, id: u32) -> Option<&Arc<FareRule>> {
                (**self).fare_rule(id)
            }

            fn pathways(&self) -> &[Arc<Pathway>] {
                (**self).pathways()
            }

            fn pathway(&self, id: &AgencyAndId) -> Option<&Arc<Pathway>> {
                (**self).pathway(id)
            }
        }
    };
}

forward_entity_graph!(Box<G>);
forward_entity_graph!(&G);
