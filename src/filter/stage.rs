use std::{sync::Arc, time::Instant};
use tracing::{debug, info};

use crate::{
    filter::FilterKind,
    graph::{EntityGraph, EntityType, Table},
    repository::{
        Agency, FareAttribute, FareRule, Frequency, Pathway, Route, ServiceCalendar,
        ServiceCalendarDate, ShapePoint, Stop, StopTime, Transfer, Trip,
    },
    shared::AgencyAndId,
};

/// The tables a stage replaces. `None` means the stage passes that kind
/// through from its input untouched.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub agencies: Option<Table<Agency>>,
    pub routes: Option<Table<Route>>,
    pub stops: Option<Table<Stop>>,
    pub trips: Option<Table<Trip>>,
    pub stop_times: Option<Table<StopTime>>,
    pub calendars: Option<Table<ServiceCalendar>>,
    pub calendar_dates: Option<Table<ServiceCalendarDate>>,
    pub shape_points: Option<Table<ShapePoint>>,
    pub frequencies: Option<Table<Frequency>>,
    pub transfers: Option<Table<Transfer>>,
    pub fare_attributes: Option<Table<FareAttribute>>,
    pub fare_rules: Option<Table<FareRule>>,
    pub pathways: Option<Table<Pathway>>,
}

impl Overrides {
    /// Row count of the replacement table for `kind`, if there is one.
    pub fn len(&self, kind: EntityType) -> Option<usize> {
        match kind {
            EntityType::Agency => self.agencies.as_ref().map(Table::len),
            EntityType::Route => self.routes.as_ref().map(Table::len),
            EntityType::Stop => self.stops.as_ref().map(Table::len),
            EntityType::Trip => self.trips.as_ref().map(Table::len),
            EntityType::StopTime => self.stop_times.as_ref().map(Table::len),
            EntityType::ServiceCalendar => self.calendars.as_ref().map(Table::len),
            EntityType::ServiceCalendarDate => self.calendar_dates.as_ref().map(Table::len),
            EntityType::ShapePoint => self.shape_points.as_ref().map(Table::len),
            EntityType::Frequency => self.frequencies.as_ref().map(Table::len),
            EntityType::Transfer => self.transfers.as_ref().map(Table::len),
            EntityType::FareAttribute => self.fare_attributes.as_ref().map(Table::len),
            EntityType::FareRule => self.fare_rules.as_ref().map(Table::len),
            EntityType::Pathway => self.pathways.as_ref().map(Table::len),
        }
    }
}

/// One filter stage's view over its input graph.
///
/// Kinds with an override are answered from the override, both for listing
/// and for lookups, so a record the stage dropped is not found here even if
/// the input still holds it. Every other kind is read through from `inner`.
pub struct FilteredGraph<G> {
    kind: FilterKind,
    inner: G,
    overrides: Overrides,
}

impl<G: EntityGraph> FilteredGraph<G> {
    pub fn new(kind: FilterKind, inner: G, overrides: Overrides) -> Self {
        for entity_type in EntityType::ALL {
            if let Some(after) = overrides.len(entity_type) {
                let before = inner.entities(entity_type).len();
                info!(
                    "{kind} filter: filtered {} down from {before} to {after}",
                    entity_type.file_stem()
                );
            }
        }
        Self {
            kind,
            inner,
            overrides,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }
}

/// Runs `derive` against `inner` and wraps the result, timing the work.
pub(crate) fn build<G, F>(kind: FilterKind, inner: G, derive: F) -> FilteredGraph<G>
where
    G: EntityGraph,
    F: FnOnce(&dyn EntityGraph) -> Overrides,
{
    debug!("Applying {kind} filter...");
    let now = Instant::now();
    let overrides = derive(&inner);
    debug!("Applying {kind} filter took {:?}", now.elapsed());
    FilteredGraph::new(kind, inner, overrides)
}

impl<G: EntityGraph> EntityGraph for FilteredGraph<G> {
    fn agencies(&self) -> &[Arc<Agency>] {
        match &self.overrides.agencies {
            Some(table) => table.items(),
            None => self.inner.agencies(),
        }
    }

    fn agency(&self, id: &str) -> Option<&Arc<Agency>> {
        match &self.overrides.agencies {
            Some(table) => table.get(id),
            None => self.inner.agency(id),
        }
    }

    fn routes(&self) -> &[Arc<Route>] {
        match &self.overrides.routes {
            Some(table) => table.items(),
            None => self.inner.routes(),
        }
    }

    fn route(&self, id: &AgencyAndId) -> Option<&Arc<Route>> {
        match &self.overrides.routes {
            Some(table) => table.get(id),
            None => self.inner.route(id),
        }
    }

    fn stops(&self) -> &[Arc<Stop>] {
        match &self.overrides.stops {
            Some(table) => table.items(),
            None => self.inner.stops(),
        }
    }

    fn stop(&self, id: &AgencyAndId) -> Option<&Arc<Stop>> {
        match &self.overrides.stops {
            Some(table) => table.get(id),
            None => self.inner.stop(id),
        }
    }

    fn trips(&self) -> &[Arc<Trip>] {
        match &self.overrides.trips {
            Some(table) => table.items(),
            None => self.inner.trips(),
        }
    }

    fn trip(&self, id: &AgencyAndId) -> Option<&Arc<Trip>> {
        match &self.overrides.trips {
            Some(table) => table.get(id),
            None => self.inner.trip(id),
        }
    }

    fn stop_times(&self) -> &[Arc<StopTime>] {
        match &self.overrides.stop_times {
            Some(table) => table.items(),
            None => self.inner.stop_times(),
        }
    }

    fn stop_time(&self, id: u32) -> Option<&Arc<StopTime>> {
        match &self.overrides.stop_times {
            Some(table) => table.get(&id),
            None => self.inner.stop_time(id),
        }
    }

    fn calendars(&self) -> &[Arc<ServiceCalendar>] {
        match &self.overrides.calendars {
            Some(table) => table.items(),
            None => self.inner.calendars(),
        }
    }

    fn calendar(&self, id: u32) -> Option<&Arc<ServiceCalendar>> {
        match &self.overrides.calendars {
            Some(table) => table.get(&id),
            None => self.inner.calendar(id),
        }
    }

    fn calendar_dates(&self) -> &[Arc<ServiceCalendarDate>] {
        match &self.overrides.calendar_dates {
            Some(table) => table.items(),
            None => self.inner.calendar_dates(),
        }
    }

    fn calendar_date(&self, id: u32) -> Option<&Arc<ServiceCalendarDate>> {
        match &self.overrides.calendar_dates {
            Some(table) => table.get(&id),
            None => self.inner.calendar_date(id),
        }
    }

    fn shape_points(&self) -> &[Arc<ShapePoint>] {
        match &self.overrides.shape_points {
            Some(table) => table.items(),
            None => self.inner.shape_points(),
        }
    }

    fn shape_point(&self, id: u32) -> Option<&Arc<ShapePoint>> {
        match &self.overrides.shape_points {
            Some(table) => table.get(&id),
            None => self.inner.shape_point(id),
        }
    }

    fn frequencies(&self) -> &[Arc<Frequency>] {
        match &self.overrides.frequencies {
            Some(table) => table.items(),
            None => self.inner.frequencies(),
        }
    }

    fn frequency(&self, id: u32) -> Option<&Arc<Frequency>> {
        match &self.overrides.frequencies {
            Some(table) => table.get(&id),
            None => self.inner.frequency(id),
        }
    }

    fn transfers(&self) -> &[Arc<Transfer>] {
        match &self.overrides.transfers {
            Some(table) => table.items(),
            None => self.inner.transfers(),
        }
    }

    fn transfer(&self, id: u32) -> Option<&Arc<Transfer>> {
        match &self.overrides.transfers {
            Some(table) => table.get(&id),
            None => self.inner.transfer(id),
        }
    }

    fn fare_attributes(&self) -> &[Arc<FareAttribute>] {
        match &self.overrides.fare_attributes {
            Some(table) => table.items(),
            None => self.inner.fare_attributes(),
        }
    }

    fn fare_attribute(&self, id: &AgencyAndId) -> Option<&Arc<FareAttribute>> {
        match &self.overrides.fare_attributes {
            Some(table) => table.get(id),
            None => self.inner.fare_attribute(id),
        }
    }

    fn fare_rules(&self) -> &[Arc<FareRule>] {
        match &self.overrides.fare_rules {
            Some(table) => table.items(),
            None => self.inner.fare_rules(),
        }
    }

    fn fare_rule(&self, id: u32) -> Option<&Arc<FareRule>> {
        match &self.overrides.fare_rules {
            Some(table) => table.get(&id),
            None => self.inner.fare_rule(id),
        }
    }

    fn pathways(&self) -> &[Arc<Pathway>] {
        match &self.overrides.pathways {
            Some(table) => table.items(),
            None => self.inner.pathways(),
        }
    }

    fn pathway(&self, id: &AgencyAndId) -> Option<&Arc<Pathway>> {
        match &self.overrides.pathways {
            Some(table) => table.get(id),
            None => self.inner.pathway(id),
        }
    }
}
