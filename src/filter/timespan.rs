use rayon::prelude::*;
use std::{fmt, str::FromStr, sync::Arc};

use crate::{
    filter::{
        Error, Filter, FilterKind, Overrides,
        closure::{self, Core},
    },
    graph::{EntityGraph, Table},
    repository::ServiceCalendar,
    shared::ServiceDate,
};

/// Inclusive range of service days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: ServiceDate,
    pub end: ServiceDate,
}

impl DateRange {
    pub fn new(start: ServiceDate, end: ServiceDate) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn day(date: ServiceDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: ServiceDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Parses a single day or `start:end`, each as `YYYYMMDD` or `YYYY-MM-DD`.
impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn date(value: &str) -> Result<ServiceDate, Error> {
            value
                .trim()
                .parse()
                .map_err(|_| Error::InvalidDate(value.to_string()))
        }

        match s.split_once(':') {
            Some((start, end)) => Self::new(date(start)?, date(end)?),
            None => Ok(Self::day(date(s)?)),
        }
    }
}

/// Keeps the service active within a date range and everything it needs.
///
/// Calendars overlapping the range are kept with their validity narrowed to
/// it; the narrowed copies belong to this stage and the input keeps its own.
#[derive(Debug, Clone)]
pub struct TimespanFilter {
    range: DateRange,
}

impl TimespanFilter {
    pub fn new(start: ServiceDate, end: ServiceDate) -> Result<Self, Error> {
        Ok(Self::from_range(DateRange::new(start, end)?))
    }

    pub fn on_day(date: ServiceDate) -> Self {
        Self::from_range(DateRange::day(date))
    }

    pub fn from_range(range: DateRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }
}

impl Filter for TimespanFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Timespan
    }

    fn derive(&self, input: &dyn EntityGraph) -> Overrides {
        let DateRange { start, end } = self.range;

        let calendars: Vec<Arc<ServiceCalendar>> = input
            .calendars()
            .par_iter()
            .filter(|calendar| calendar.overlaps(start, end))
            .map(|calendar| Arc::new(calendar.clipped(start, end)))
            .collect();
        let calendars = Table::new(calendars);
        let calendar_dates = closure::select(input.calendar_dates(), |date| {
            self.range.contains(date.date)
        });

        let mut service_ids = closure::project(calendars.items(), |calendar| {
            Some(calendar.service_id.clone())
        });
        service_ids.extend(closure::project(calendar_dates.items(), |date| {
            Some(date.service_id.clone())
        }));

        let trips = closure::select(input.trips(), |trip| service_ids.contains(&trip.service_id));
        let route_ids = closure::project(trips.items(), |trip| Some(trip.route_id.clone()));
        let routes = closure::select(input.routes(), |route| route_ids.contains(&route.id));

        // Route first, then trip. The route pass alone would let through
        // off-range trips of a route that also runs in range.
        let stop_times = closure::select(input.stop_times(), |stop_time| {
            input
                .trip(&stop_time.trip_id)
                .is_some_and(|trip| route_ids.contains(&trip.route_id))
        });
        let stop_times = closure::select(stop_times.items(), |stop_time| {
            trips.contains(&stop_time.trip_id)
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
                calendars: Some(calendars),
                calendar_dates: Some(calendar_dates),
            },
        )
    }
}
