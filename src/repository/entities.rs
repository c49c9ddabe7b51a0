use std::sync::Arc;

use crate::shared::{AgencyAndId, Coordinate, ServiceDate, Time};

/// A transit operator, keyed by its plain `agency_id`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Agency {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub url: Arc<str>,
    pub timezone: Arc<str>,
    pub lang: Option<Arc<str>>,
    pub phone: Option<Arc<str>>,
    pub fare_url: Option<Arc<str>>,
    pub email: Option<Arc<str>>,
}

/// A grouping of trips that are displayed to riders under a single name (e.g., "Blue Line").
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Route {
    pub id: AgencyAndId,
    pub agency_id: Arc<str>,
    pub short_name: Option<Arc<str>>,
    pub long_name: Option<Arc<str>>,
    pub desc: Option<Arc<str>>,
    /// Classification of the vehicle (0: Tram, 1: Subway, 3: Bus, etc.).
    pub route_type: i32,
    pub url: Option<Arc<str>>,
    pub color: Option<Arc<str>>,
    pub text_color: Option<Arc<str>>,
}

/// A physical point where passengers can board or alight from a vehicle.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stop {
    pub id: AgencyAndId,
    pub code: Option<Arc<str>>,
    pub name: Option<Arc<str>>,
    pub desc: Option<Arc<str>>,
    /// Generic nodes and boarding areas may come without a position.
    pub coordinate: Option<Coordinate>,
    pub zone_id: Option<Arc<str>>,
    pub url: Option<Arc<str>>,
    pub location_type: Option<u8>,
    pub parent_station: Option<AgencyAndId>,
    pub timezone: Option<Arc<str>>,
    pub wheelchair_boarding: Option<u8>,
    pub platform_code: Option<Arc<str>>,
}

/// A specific journey taken by a vehicle through a sequence of stops.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Trip {
    pub id: AgencyAndId,
    /// Pointer to the parent [`Route`].
    pub route_id: AgencyAndId,
    /// Links the trip to its [`ServiceCalendar`] and [`ServiceCalendarDate`] rows.
    pub service_id: AgencyAndId,
    /// Links the trip to its [`ShapePoint`]s, when the feed has shapes.
    pub shape_id: Option<AgencyAndId>,
    pub headsign: Option<Arc<str>>,
    pub short_name: Option<Arc<str>>,
    pub direction_id: Option<u8>,
    pub block_id: Option<Arc<str>>,
    pub wheelchair_accessible: Option<u8>,
    pub bikes_allowed: Option<u8>,
}

/// Individual event within a trip where a vehicle calls at a stop.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StopTime {
    /// Row number assigned by the reader.
    pub id: u32,
    pub trip_id: AgencyAndId,
    pub stop_id: AgencyAndId,
    pub sequence: u32,
    pub arrival_time: Option<Time>,
    pub departure_time: Option<Time>,
    pub headsign: Option<Arc<str>>,
    pub pickup_type: Option<u8>,
    pub drop_off_type: Option<u8>,
    pub shape_dist_traveled: Option<f64>,
    pub timepoint: Option<u8>,
}

/// Weekly service pattern valid between two dates, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCalendar {
    pub id: u32,
    pub service_id: AgencyAndId,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub start_date: ServiceDate,
    pub end_date: ServiceDate,
}

impl ServiceCalendar {
    pub fn overlaps(&self, start: ServiceDate, end: ServiceDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }

    /// Returns a copy whose validity range is narrowed to `[start, end]`.
    pub fn clipped(&self, start: ServiceDate, end: ServiceDate) -> Self {
        Self {
            start_date: self.start_date.max(start),
            end_date: self.end_date.min(end),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Added,
    Removed,
}

impl ExceptionType {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Added),
            2 => Some(Self::Removed),
            _ => None,
        }
    }

    pub const fn code(&self) -> u8 {
        match self {
            Self::Added => 1,
            Self::Removed => 2,
        }
    }
}

/// A single-day exception to a service pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCalendarDate {
    pub id: u32,
    pub service_id: AgencyAndId,
    pub date: ServiceDate,
    pub exception_type: ExceptionType,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShapePoint {
    pub id: u32,
    pub shape_id: AgencyAndId,
    pub sequence: u32,
    pub coordinate: Coordinate,
    pub dist_traveled: Option<f64>,
}

/// Headway based service for a trip between two times of day.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frequency {
    pub id: u32,
    pub trip_id: AgencyAndId,
    pub start_time: Time,
    pub end_time: Time,
    pub headway_secs: u32,
    pub exact_times: Option<u8>,
}

/// A connection between two stops, optionally restricted to given routes or trips.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transfer {
    pub id: u32,
    pub from_stop_id: AgencyAndId,
    pub to_stop_id: AgencyAndId,
    pub from_route_id: Option<AgencyAndId>,
    pub to_route_id: Option<AgencyAndId>,
    pub from_trip_id: Option<AgencyAndId>,
    pub to_trip_id: Option<AgencyAndId>,
    pub transfer_type: Option<u8>,
    /// The minimum time (in seconds) required to successfully complete this transfer.
    pub min_transfer_time: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FareAttribute {
    pub id: AgencyAndId,
    pub price: f64,
    pub currency_type: Arc<str>,
    pub payment_method: u8,
    pub transfers: Option<u8>,
    pub agency_id: Option<Arc<str>>,
    pub transfer_duration: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FareRule {
    pub id: u32,
    pub fare_id: AgencyAndId,
    pub route_id: Option<AgencyAndId>,
    pub origin_id: Option<Arc<str>>,
    pub destination_id: Option<Arc<str>>,
    pub contains_id: Option<Arc<str>>,
}

/// A walkway, stair or similar link between two locations of a station.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pathway {
    pub id: AgencyAndId,
    pub from_stop_id: AgencyAndId,
    pub to_stop_id: AgencyAndId,
    pub pathway_mode: u8,
    pub is_bidirectional: u8,
    pub length: Option<f64>,
    pub traversal_time: Option<u32>,
    pub signposted_as: Option<Arc<str>>,
}
