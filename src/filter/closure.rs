//! Set operations the stages build their closures from.
//!
//! Every primitive runs on rayon and keeps input order, so a stage's output
//! lists records in the same order as its input.

use rayon::prelude::*;
use std::{collections::HashSet, hash::Hash, sync::Arc};

use crate::{
    filter::Overrides,
    graph::{Entity, EntityGraph, Table},
    repository::{Route, ServiceCalendar, ServiceCalendarDate, Stop, StopTime, Trip},
    shared::AgencyAndId,
};

/// Records of `items` matching `predicate`.
pub fn select<T, P>(items: &[Arc<T>], predicate: P) -> Table<T>
where
    T: Entity,
    P: Fn(&T) -> bool + Sync,
{
    let selected: Vec<Arc<T>> = items
        .par_iter()
        .filter(|item| predicate(item))
        .cloned()
        .collect();
    Table::new(selected)
}

/// Distinct values `f` extracts from `items`, typically a foreign key.
pub fn project<T, K, F>(items: &[Arc<T>], f: F) -> HashSet<K>
where
    T: Send + Sync,
    K: Eq + Hash + Send,
    F: Fn(&T) -> Option<K> + Sync,
{
    items.par_iter().filter_map(|item| f(item)).collect()
}

pub fn keys<T: Entity>(items: &[Arc<T>]) -> HashSet<T::Key> {
    project(items, |item| Some(item.key()))
}

/// The sets a stage decides on directly. Calendars and calendar dates are
/// only given by stages that restrict them on their own terms.
pub struct Core {
    pub stops: Table<Stop>,
    pub stop_times: Table<StopTime>,
    pub trips: Table<Trip>,
    pub routes: Table<Route>,
    pub calendars: Option<Table<ServiceCalendar>>,
    pub calendar_dates: Option<Table<ServiceCalendarDate>>,
}

/// Derives the dependent records of `core` from `input`.
///
/// Agencies and fare attributes are left to the inner graph.
pub fn complete(input: &dyn EntityGraph, core: Core) -> Overrides {
    let Core {
        stops,
        stop_times,
        trips,
        routes,
        calendars,
        calendar_dates,
    } = core;

    let service_ids = project(trips.items(), |trip| Some(trip.service_id.clone()));
    let calendars = calendars.unwrap_or_else(|| {
        select(input.calendars(), |calendar| {
            service_ids.contains(&calendar.service_id)
        })
    });
    let calendar_dates = calendar_dates.unwrap_or_else(|| {
        select(input.calendar_dates(), |date| {
            service_ids.contains(&date.service_id)
        })
    });

    let trip_ids = keys(trips.items());
    let frequencies = select(input.frequencies(), |frequency| {
        trip_ids.contains(&frequency.trip_id)
    });

    let shape_ids = project(trips.items(), |trip| trip.shape_id.clone());
    let shape_points = select(input.shape_points(), |point| {
        shape_ids.contains(&point.shape_id)
    });

    let stop_ids = keys(stops.items());
    let route_ids = keys(routes.items());
    let kept = |ids: &HashSet<AgencyAndId>, id: &Option<AgencyAndId>| {
        id.as_ref().is_none_or(|id| ids.contains(id))
    };
    let transfers = select(input.transfers(), |transfer| {
        stop_ids.contains(&transfer.from_stop_id)
            && stop_ids.contains(&transfer.to_stop_id)
            && kept(&trip_ids, &transfer.from_trip_id)
            && kept(&trip_ids, &transfer.to_trip_id)
            && kept(&route_ids, &transfer.from_route_id)
            && kept(&route_ids, &transfer.to_route_id)
    });
    let pathways = select(input.pathways(), |pathway| {
        stop_ids.contains(&pathway.from_stop_id) && stop_ids.contains(&pathway.to_stop_id)
    });
    let fare_rules = select(input.fare_rules(), |rule| kept(&route_ids, &rule.route_id));

    Overrides {
        routes: Some(routes),
        stops: Some(stops),
        trips: Some(trips),
        stop_times: Some(stop_times),
        calendars: Some(calendars),
        calendar_dates: Some(calendar_dates),
        shape_points: Some(shape_points),
        frequencies: Some(frequencies),
        transfers: Some(transfers),
        fare_rules: Some(fare_rules),
        pathways: Some(pathways),
        ..Default::default()
    }
}
