#![allow(dead_code)]

use gtfs_filter::prelude::*;
use std::collections::BTreeSet;

pub const AGENCY: &str = "A";

pub fn id(value: &str) -> AgencyAndId {
    AgencyAndId::new(AGENCY, value)
}

pub fn date(y: i32, m: u32, d: u32) -> ServiceDate {
    ServiceDate::from_ymd(y, m, d).unwrap()
}

fn stop(name: &str, latitude: f64, longitude: f64) -> Stop {
    Stop {
        id: id(name),
        name: Some(name.into()),
        coordinate: Some(Coordinate::new(latitude, longitude)),
        ..Default::default()
    }
}

fn route(name: &str, route_type: i32) -> Route {
    Route {
        id: id(name),
        agency_id: AGENCY.into(),
        short_name: Some(name.into()),
        route_type,
        ..Default::default()
    }
}

fn trip(name: &str, route: &str, service: &str, shape: Option<&str>) -> Trip {
    Trip {
        id: id(name),
        route_id: id(route),
        service_id: id(service),
        shape_id: shape.map(id),
        ..Default::default()
    }
}

fn calendar(index: u32, service: &str, start: ServiceDate, end: ServiceDate) -> ServiceCalendar {
    ServiceCalendar {
        id: index,
        service_id: id(service),
        monday: true,
        tuesday: true,
        wednesday: true,
        thursday: true,
        friday: true,
        saturday: false,
        sunday: false,
        start_date: start,
        end_date: end,
    }
}

/// A small two route feed.
///
/// | trip | route      | service                    | stops      |
/// |------|------------|----------------------------|------------|
/// | T1   | TRAM (0)   | WEEK, January 2020         | S1 S5 S2   |
/// | T2   | BUS (3)    | FEB, 1 to 10 February 2020 | S5 S3      |
/// | T3   | BUS (3)    | HOLIDAY, 15 January only   | S3 S4      |
///
/// Stops sit at S1 (10,10), S2 (20,20), S3 (30,30), S4 (25,25) and
/// S5 (15,15); S6 (12,12) is served by nothing.
pub fn feed() -> Repository {
    let trips = [
        ("T1", &["S1", "S5", "S2"][..]),
        ("T2", &["S5", "S3"][..]),
        ("T3", &["S3", "S4"][..]),
    ];
    let stop_times = trips
        .iter()
        .flat_map(|(trip, stops)| stops.iter().map(move |stop| (*trip, *stop)))
        .enumerate()
        .map(|(i, (trip, stop))| StopTime {
            id: i as u32,
            trip_id: id(trip),
            stop_id: id(stop),
            sequence: i as u32,
            arrival_time: Some(Time::from_seconds(8 * 3600 + i as u32 * 60)),
            departure_time: Some(Time::from_seconds(8 * 3600 + i as u32 * 60)),
            ..Default::default()
        });

    Repository {
        agencies: [Agency {
            id: AGENCY.into(),
            name: "Agency".into(),
            url: "https://example.org".into(),
            timezone: "Europe/Brussels".into(),
            ..Default::default()
        }]
        .into_iter()
        .collect(),
        routes: [route("TRAM", 0), route("BUS", 3)].into_iter().collect(),
        stops: [
            stop("S1", 10.0, 10.0),
            stop("S2", 20.0, 20.0),
            stop("S3", 30.0, 30.0),
            stop("S4", 25.0, 25.0),
            stop("S5", 15.0, 15.0),
            stop("S6", 12.0, 12.0),
        ]
        .into_iter()
        .collect(),
        trips: [
            trip("T1", "TRAM", "WEEK", Some("SH1")),
            trip("T2", "BUS", "FEB", Some("SH2")),
            trip("T3", "BUS", "HOLIDAY", None),
        ]
        .into_iter()
        .collect(),
        stop_times: stop_times.collect(),
        calendars: [
            calendar(0, "WEEK", date(2020, 1, 1), date(2020, 1, 31)),
            calendar(1, "FEB", date(2020, 2, 1), date(2020, 2, 10)),
        ]
        .into_iter()
        .collect(),
        calendar_dates: [
            ServiceCalendarDate {
                id: 0,
                service_id: id("HOLIDAY"),
                date: date(2020, 1, 15),
                exception_type: ExceptionType::Added,
            },
            ServiceCalendarDate {
                id: 1,
                service_id: id("WEEK"),
                date: date(2020, 1, 20),
                exception_type: ExceptionType::Removed,
            },
        ]
        .into_iter()
        .collect(),
        shape_points: [("SH1", 10.0), ("SH1", 15.0), ("SH1", 20.0), ("SH2", 15.0), ("SH2", 30.0)]
            .into_iter()
            .enumerate()
            .map(|(i, (shape, position))| ShapePoint {
                id: i as u32,
                shape_id: id(shape),
                sequence: i as u32,
                coordinate: Coordinate::new(position, position),
                dist_traveled: None,
            })
            .collect(),
        frequencies: [("T1", 600), ("T2", 900)]
            .into_iter()
            .enumerate()
            .map(|(i, (trip, headway_secs))| Frequency {
                id: i as u32,
                trip_id: id(trip),
                start_time: Time::from_seconds(6 * 3600),
                end_time: Time::from_seconds(25 * 3600),
                headway_secs,
                exact_times: None,
            })
            .collect(),
        transfers: [("S1", "S2"), ("S2", "S3"), ("S1", "S5")]
            .into_iter()
            .enumerate()
            .map(|(i, (from, to))| Transfer {
                id: i as u32,
                from_stop_id: id(from),
                to_stop_id: id(to),
                transfer_type: Some(2),
                min_transfer_time: Some(120),
                ..Default::default()
            })
            .collect(),
        fare_attributes: [FareAttribute {
            id: id("F1"),
            price: 2.5,
            currency_type: "EUR".into(),
            payment_method: 0,
            ..Default::default()
        }]
        .into_iter()
        .collect(),
        fare_rules: [Some("TRAM"), Some("BUS"), None]
            .into_iter()
            .enumerate()
            .map(|(i, route)| FareRule {
                id: i as u32,
                fare_id: id("F1"),
                route_id: route.map(id),
                ..Default::default()
            })
            .collect(),
        pathways: [("P1", "S1", "S5"), ("P2", "S3", "S4")]
            .into_iter()
            .map(|(name, from, to)| Pathway {
                id: id(name),
                from_stop_id: id(from),
                to_stop_id: id(to),
                pathway_mode: 1,
                is_bidirectional: 1,
                ..Default::default()
            })
            .collect(),
    }
}

/// Raw ids of the records of one kind, for order independent comparisons.
pub fn stop_ids<G: EntityGraph + ?Sized>(graph: &G) -> BTreeSet<String> {
    graph.stops().iter().map(|s| s.id.id.to_string()).collect()
}

pub fn trip_ids<G: EntityGraph + ?Sized>(graph: &G) -> BTreeSet<String> {
    graph.trips().iter().map(|t| t.id.id.to_string()).collect()
}

pub fn route_ids<G: EntityGraph + ?Sized>(graph: &G) -> BTreeSet<String> {
    graph.routes().iter().map(|r| r.id.id.to_string()).collect()
}

pub fn stop_time_ids<G: EntityGraph + ?Sized>(graph: &G) -> BTreeSet<u32> {
    graph.stop_times().iter().map(|st| st.id).collect()
}

pub fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Panics when any reference inside `graph` points at a record `graph`
/// does not hold.
pub fn assert_closed<G: EntityGraph + ?Sized>(graph: &G) {
    for stop_time in graph.stop_times() {
        assert!(graph.trip(&stop_time.trip_id).is_some(), "{stop_time:?}");
        assert!(graph.stop(&stop_time.stop_id).is_some(), "{stop_time:?}");
    }
    let shapes: BTreeSet<_> = graph.shape_points().iter().map(|p| p.shape_id.clone()).collect();
    for trip in graph.trips() {
        assert!(graph.route(&trip.route_id).is_some(), "{trip:?}");
        if let Some(shape_id) = &trip.shape_id {
            assert!(shapes.contains(shape_id), "{trip:?}");
        }
    }
    for frequency in graph.frequencies() {
        assert!(graph.trip(&frequency.trip_id).is_some(), "{frequency:?}");
    }
    for transfer in graph.transfers() {
        assert!(graph.stop(&transfer.from_stop_id).is_some(), "{transfer:?}");
        assert!(graph.stop(&transfer.to_stop_id).is_some(), "{transfer:?}");
    }
    for pathway in graph.pathways() {
        assert!(graph.stop(&pathway.from_stop_id).is_some(), "{pathway:?}");
        assert!(graph.stop(&pathway.to_stop_id).is_some(), "{pathway:?}");
    }
    for rule in graph.fare_rules() {
        if let Some(route_id) = &rule.route_id {
            assert!(graph.route(route_id).is_some(), "{rule:?}");
        }
    }
}
