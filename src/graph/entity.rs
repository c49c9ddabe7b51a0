use std::{fmt, hash::Hash, str::FromStr, sync::Arc};

use crate::{
    graph::{EntityGraph, Error},
    repository::{
        Agency, FareAttribute, FareRule, Frequency, Pathway, Route, ServiceCalendar,
        ServiceCalendarDate, ShapePoint, Stop, StopTime, Transfer, Trip,
    },
    shared::AgencyAndId,
};

/// The thirteen kinds of record a feed is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Agency,
    ShapePoint,
    Route,
    Stop,
    Trip,
    StopTime,
    ServiceCalendar,
    ServiceCalendarDate,
    FareAttribute,
    FareRule,
    Frequency,
    Pathway,
    Transfer,
}

impl EntityType {
    /// Every kind, in the order a writer visits them.
    pub const ALL: [EntityType; 13] = [
        Self::Agency,
        Self::ShapePoint,
        Self::Route,
        Self::Stop,
        Self::Trip,
        Self::StopTime,
        Self::ServiceCalendar,
        Self::ServiceCalendarDate,
        Self::FareAttribute,
        Self::FareRule,
        Self::Frequency,
        Self::Pathway,
        Self::Transfer,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Agency => "Agency",
            Self::ShapePoint => "ShapePoint",
            Self::Route => "Route",
            Self::Stop => "Stop",
            Self::Trip => "Trip",
            Self::StopTime => "StopTime",
            Self::ServiceCalendar => "ServiceCalendar",
            Self::ServiceCalendarDate => "ServiceCalendarDate",
            Self::FareAttribute => "FareAttribute",
            Self::FareRule => "FareRule",
            Self::Frequency => "Frequency",
            Self::Pathway => "Pathway",
            Self::Transfer => "Transfer",
        }
    }

    /// Name of the GTFS file holding this kind, without extension.
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::ShapePoint => "shapes",
            Self::Route => "routes",
            Self::Stop => "stops",
            Self::Trip => "trips",
            Self::StopTime => "stop_times",
            Self::ServiceCalendar => "calendar",
            Self::ServiceCalendarDate => "calendar_dates",
            Self::FareAttribute => "fare_attributes",
            Self::FareRule => "fare_rules",
            Self::Frequency => "frequencies",
            Self::Pathway => "pathways",
            Self::Transfer => "transfers",
        }
    }

    /// Whether a feed without this file is unusable.
    pub const fn is_required(&self) -> bool {
        matches!(
            self,
            Self::Agency | Self::Stop | Self::Route | Self::Trip | Self::StopTime
        )
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the type name (`StopTime`), the file name (`stop_times.txt`) or its
/// stem, in any case.
impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn normalize(value: &str) -> String {
            value
                .trim()
                .trim_end_matches(".txt")
                .chars()
                .filter(|c| *c != '_')
                .collect::<String>()
                .to_lowercase()
        }

        let needle = normalize(s);
        Self::ALL
            .into_iter()
            .find(|kind| needle == normalize(kind.name()) || needle == normalize(kind.file_stem()))
            .ok_or_else(|| Error::UnknownEntityType(s.to_string()))
    }
}

/// A record type that lives in an [`EntityGraph`].
pub trait Entity: fmt::Debug + Send + Sync + Sized + 'static {
    /// Value identity of the record.
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync;

    const KIND: EntityType;

    fn key(&self) -> Self::Key;

    /// Every record of this kind in `graph`.
    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>];

    /// The record with `key` in `graph`, if the graph holds it.
    fn find_in<'g, G: EntityGraph + ?Sized>(graph: &'g G, key: &Self::Key)
    -> Option<&'g Arc<Self>>;
}

impl Entity for Agency {
    type Key = Arc<str>;
    const KIND: EntityType = EntityType::Agency;

    fn key(&self) -> Self::Key {
        self.id.clone()
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.agencies()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.agency(key)
    }
}

impl Entity for Route {
    type Key = AgencyAndId;
    const KIND: EntityType = EntityType::Route;

    fn key(&self) -> Self::Key {
        self.id.clone()
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.routes()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.route(key)
    }
}

impl Entity for Stop {
    type Key = AgencyAndId;
    const KIND: EntityType = EntityType::Stop;

    fn key(&self) -> Self::Key {
        self.id.clone()
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.stops()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.stop(key)
    }
}

impl Entity for Trip {
    type Key = AgencyAndId;
    const KIND: EntityType = EntityType::Trip;

    fn key(&self) -> Self::Key {
        self.id.clone()
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.trips()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.trip(key)
    }
}

impl Entity for StopTime {
    type Key = u32;
    const KIND: EntityType = EntityType::StopTime;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.stop_times()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.stop_time(*key)
    }
}

impl Entity for ServiceCalendar {
    type Key = u32;
    const KIND: EntityType = EntityType::ServiceCalendar;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.calendars()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.calendar(*key)
    }
}

impl Entity for ServiceCalendarDate {
    type Key = u32;
    const KIND: EntityType = EntityType::ServiceCalendarDate;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.calendar_dates()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.calendar_date(*key)
    }
}

impl Entity for ShapePoint {
    type Key = u32;
    const KIND: EntityType = EntityType::ShapePoint;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.shape_points()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.shape_point(*key)
    }
}

impl Entity for Frequency {
    type Key = u32;
    const KIND: EntityType = EntityType::Frequency;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.frequencies()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.frequency(*key)
    }
}

impl Entity for Transfer {
    type Key = u32;
    const KIND: EntityType = EntityType::Transfer;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.transfers()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.transfer(*key)
    }
}

impl Entity for FareAttribute {
    type Key = AgencyAndId;
    const KIND: EntityType = EntityType::FareAttribute;

    fn key(&self) -> Self::Key {
        self.id.clone()
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.fare_attributes()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.fare_attribute(key)
    }
}

impl Entity for FareRule {
    type Key = u32;
    const KIND: EntityType = EntityType::FareRule;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.fare_rules()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.fare_rule(*key)
    }
}

impl Entity for Pathway {
    type Key = AgencyAndId;
    const KIND: EntityType = EntityType::Pathway;

    fn key(&self) -> Self::Key {
        self.id.clone()
    }

    fn all_in<G: EntityGraph + ?Sized>(graph: &G) -> &[Arc<Self>] {
        graph.pathways()
    }

    fn find_in<'g, G: EntityGraph + ?Sized>(
        graph: &'g G,
        key: &Self::Key,
    ) -> Option<&'g Arc<Self>> {
        graph.pathway(key)
    }
}

/// Type-erased view over one kind of record, for consumers that walk every
/// kind generically.
#[derive(Debug, Clone, Copy)]
pub enum Entities<'a> {
    Agencies(&'a [Arc<Agency>]),
    ShapePoints(&'a [Arc<ShapePoint>]),
    Routes(&'a [Arc<Route>]),
    Stops(&'a [Arc<Stop>]),
    Trips(&'a [Arc<Trip>]),
    StopTimes(&'a [Arc<StopTime>]),
    Calendars(&'a [Arc<ServiceCalendar>]),
    CalendarDates(&'a [Arc<ServiceCalendarDate>]),
    FareAttributes(&'a [Arc<FareAttribute>]),
    FareRules(&'a [Arc<FareRule>]),
    Frequencies(&'a [Arc<Frequency>]),
    Pathways(&'a [Arc<Pathway>]),
    Transfers(&'a [Arc<Transfer>]),
}

impl Entities<'_> {
    pub fn kind(&self) -> EntityType {
        match self {
            Self::Agencies(_) => EntityType::Agency,
            Self::ShapePoints(_) => EntityType::ShapePoint,
            Self::Routes(_) => EntityType::Route,
            Self::Stops(_) => EntityType::Stop,
            Self::Trips(_) => EntityType::Trip,
            Self::StopTimes(_) => EntityType::StopTime,
            Self::Calendars(_) => EntityType::ServiceCalendar,
            Self::CalendarDates(_) => EntityType::ServiceCalendarDate,
            Self::FareAttributes(_) => EntityType::FareAttribute,
            Self::FareRules(_) => EntityType::FareRule,
            Self::Frequencies(_) => EntityType::Frequency,
            Self::Pathways(_) => EntityType::Pathway,
            Self::Transfers(_) => EntityType::Transfer,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Agencies(items) => items.len(),
            Self::ShapePoints(items) => items.len(),
            Self::Routes(items) => items.len(),
            Self::Stops(items) => items.len(),
            Self::Trips(items) => items.len(),
            Self::StopTimes(items) => items.len(),
            Self::Calendars(items) => items.len(),
            Self::CalendarDates(items) => items.len(),
            Self::FareAttributes(items) => items.len(),
            Self::FareRules(items) => items.len(),
            Self::Frequencies(items) => items.len(),
            Self::Pathways(items) => items.len(),
            Self::Transfers(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_file_names() {
        assert_eq!("StopTime".parse::<EntityType>().unwrap(), EntityType::StopTime);
        assert_eq!("stop_times".parse::<EntityType>().unwrap(), EntityType::StopTime);
        assert_eq!(
            "stop_times.txt".parse::<EntityType>().unwrap(),
            EntityType::StopTime
        );
        assert_eq!(
            "calendar_dates.txt".parse::<EntityType>().unwrap(),
            EntityType::ServiceCalendarDate
        );
        assert_eq!("shapes".parse::<EntityType>().unwrap(), EntityType::ShapePoint);
        assert_eq!("AGENCY".parse::<EntityType>().unwrap(), EntityType::Agency);
    }

    #[test]
    fn every_kind_parses_back() {
        for kind in EntityType::ALL {
            assert_eq!(kind.name().parse::<EntityType>().unwrap(), kind);
            assert_eq!(kind.file_stem().parse::<EntityType>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = "levels.txt".parse::<EntityType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown entity type: levels.txt");
    }
}
