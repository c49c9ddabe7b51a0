use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    filter::{
        Error, Filter, FilterKind, Overrides,
        closure::{self, Core},
    },
    graph::EntityGraph,
};

/// The basic GTFS route types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
}

impl TransportMode {
    pub const ALL: [TransportMode; 8] = [
        Self::Tram,
        Self::Subway,
        Self::Rail,
        Self::Bus,
        Self::Ferry,
        Self::CableCar,
        Self::Gondola,
        Self::Funicular,
    ];

    pub const fn code(&self) -> i32 {
        match self {
            Self::Tram => 0,
            Self::Subway => 1,
            Self::Rail => 2,
            Self::Bus => 3,
            Self::Ferry => 4,
            Self::CableCar => 5,
            Self::Gondola => 6,
            Self::Funicular => 7,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Tram => "tram",
            Self::Subway => "subway",
            Self::Rail => "rail",
            Self::Bus => "bus",
            Self::Ferry => "ferry",
            Self::CableCar => "cablecar",
            Self::Gondola => "gondola",
            Self::Funicular => "funicular",
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace(['_', '-', ' '], "");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == needle)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

/// Parses a mode name or a bare route type code, such as `tram`, `Bus` or
/// `700`.
pub fn parse_mode(s: &str) -> Result<i32, Error> {
    match s.trim().parse::<i32>() {
        Ok(code) => Ok(code),
        Err(_) => s.parse::<TransportMode>().map(|mode| mode.code()),
    }
}

/// Keeps the routes of the selected route types and everything they use.
///
/// Stops served by both kept and dropped routes stay; stops only dropped
/// routes serve go.
#[derive(Debug, Clone)]
pub struct ModeFilter {
    modes: BTreeSet<i32>,
}

impl ModeFilter {
    pub fn new<I: IntoIterator<Item = i32>>(modes: I) -> Result<Self, Error> {
        let modes: BTreeSet<i32> = modes.into_iter().collect();
        if modes.is_empty() {
            return Err(Error::EmptyModeSet);
        }
        Ok(Self { modes })
    }

    pub fn from_modes<I: IntoIterator<Item = TransportMode>>(modes: I) -> Result<Self, Error> {
        Self::new(modes.into_iter().map(|mode| mode.code()))
    }

    pub fn modes(&self) -> &BTreeSet<i32> {
        &self.modes
    }
}

impl Filter for ModeFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Mode
    }

    fn derive(&self, input: &dyn EntityGraph) -> Overrides {
        let routes = closure::select(input.routes(), |route| {
            self.modes.contains(&route.route_type)
        });
        let trips = closure::select(input.trips(), |trip| routes.contains(&trip.route_id));
        let stop_times = closure::select(input.stop_times(), |stop_time| {
            input
                .trip(&stop_time.trip_id)
                .is_some_and(|trip| routes.contains(&trip.route_id))
        });

        let stop_ids = closure::project(stop_times.items(), |stop_time| {
            Some(stop_time.stop_id.clone())
        });
        let stops = closure::select(input.stops(), |stop| stop_ids.contains(&stop.id));

        closure::complete(
            input,
            Core {
                stops,
                stop_times,
                trips,
                routes,
                calendars: None,
                calendar_dates: None,
            },
        )
    }
}
