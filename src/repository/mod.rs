use std::sync::Arc;

mod entities;
mod source;
pub use entities::*;

use crate::{
    graph::{EntityGraph, Table},
    shared::AgencyAndId,
};

/// A fully materialized feed, the root every filter chain starts from.
///
/// Tables are public so feeds can also be assembled in code:
///
/// ```
/// use gtfs_filter::prelude::*;
///
/// let repository = Repository {
///     stops: [Stop {
///         id: AgencyAndId::new("A", "S1"),
///         coordinate: Some(Coordinate::new(51.05, 3.72)),
///         ..Default::default()
///     }]
///     .into_iter()
///     .collect(),
///     ..Default::default()
/// };
/// assert_eq!(repository.stops().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub agencies: Table<Agency>,
    pub routes: Table<Route>,
    pub stops: Table<Stop>,
    pub trips: Table<Trip>,
    pub stop_times: Table<StopTime>,
    pub calendars: Table<ServiceCalendar>,
    pub calendar_dates: Table<ServiceCalendarDate>,
    pub shape_points: Table<ShapePoint>,
    pub frequencies: Table<Frequency>,
    pub transfers: Table<Transfer>,
    pub fare_attributes: Table<FareAttribute>,
    pub fare_rules: Table<FareRule>,
    pub pathways: Table<Pathway>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }
}

impl EntityGraph for Repository {
    fn agencies(&self) -> &[Arc<Agency>] {
        self.agencies.items()
    }

    fn agency(&self, id: &str) -> Option<&Arc<Agency>> {
        self.agencies.get(id)
    }

    fn routes(&self) -> &[Arc<Route>] {
        self.routes.items()
    }

    fn route(&self, id: &AgencyAndId) -> Option<&Arc<Route>> {
        self.routes.get(id)
    }

    fn stops(&self) -> &[Arc<Stop>] {
        self.stops.items()
    }

    fn stop(&self, id: &AgencyAndId) -> Option<&Arc<Stop>> {
        self.stops.get(id)
    }

    fn trips(&self) -> &[Arc<Trip>] {
        self.trips.items()
    }

    fn trip(&self, id: &AgencyAndId) -> Option<&Arc<Trip>> {
        self.trips.get(id)
    }

    fn stop_times(&self) -> &[Arc<StopTime>] {
        self.stop_times.items()
    }

    fn stop_time(&self, id: u32) -> Option<&Arc<StopTime>> {
        self.stop_times.get(&id)
    }

    fn calendars(&self) -> &[Arc<ServiceCalendar>] {
        self.calendars.items()
    }

    fn calendar(&self, id: u32) -> Option<&Arc<ServiceCalendar>> {
        self.calendars.get(&id)
    }

    fn calendar_dates(&self) -> &[Arc<ServiceCalendarDate>] {
        self.calendar_dates.items()
    }

    fn calendar_date(&self, id: u32) -> Option<&Arc<ServiceCalendarDate>> {
        self.calendar_dates.get(&id)
    }

    fn shape_points(&self) -> &[Arc<ShapePoint>] {
        self.shape_points.items()
    }

    fn shape_point(&self, id: u32) -> Option<&Arc<ShapePoint>> {
        self.shape_points.get(&id)
    }

    fn frequencies(&self) -> &[Arc<Frequency>] {
        self.frequencies.items()
    }

    fn frequency(&self, id: u32) -> Option<&Arc<Frequency>> {
        self.frequencies.get(&id)
    }

    fn transfers(&self) -> &[Arc<Transfer>] {
        self.transfers.items()
    }

    fn transfer(&self, id: u32) -> Option<&Arc<Transfer>> {
        self.transfers.get(&id)
    }

    fn fare_attributes(&self) -> &[Arc<FareAttribute>] {
        self.fare_attributes.items()
    }

    fn fare_attribute(&self, id: &AgencyAndId) -> Option<&Arc<FareAttribute>> {
        self.fare_attributes.get(id)
    }

    fn fare_rules(&self) -> &[Arc<FareRule>] {
        self.fare_rules.items()
    }

    fn fare_rule(&self, id: u32) -> Option<&Arc<FareRule>> {
        self.fare_rules.get(&id)
    }

    fn pathways(&self) -> &[Arc<Pathway>] {
        self.pathways.items()
    }

    fn pathway(&self, id: &AgencyAndId) -> Option<&Arc<Pathway>> {
        self.pathways.get(id)
    }
}
