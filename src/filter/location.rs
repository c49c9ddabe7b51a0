use std::{fmt, str::FromStr};

use crate::{
    filter::{
        Error, Filter, FilterKind, Overrides,
        closure::{self, Core},
    },
    graph::EntityGraph,
    shared::Coordinate,
};

/// Latitude/longitude rectangle. Containment is strict: a point on an edge
/// is outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self, Error> {
        for value in [min_lat, min_lon, max_lat, max_lon] {
            if !value.is_finite() {
                return Err(Error::InvalidCoordinate(value.to_string()));
            }
        }
        if min_lat >= max_lat || min_lon >= max_lon {
            return Err(Error::InvalidBoundingBox(format!(
                "{min_lat}:{min_lon}:{max_lat}:{max_lon}"
            )));
        }
        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.latitude > self.min_lat
            && coordinate.longitude > self.min_lon
            && coordinate.latitude < self.max_lat
            && coordinate.longitude < self.max_lon
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Parses `minLat:minLon:maxLat:maxLon`.
impl FromStr for BoundingBox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(':')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| Error::InvalidCoordinate(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        match values[..] {
            [min_lat, min_lon, max_lat, max_lon] => Self::new(min_lat, min_lon, max_lat, max_lon),
            _ => Err(Error::InvalidBoundingBox(s.to_string())),
        }
    }
}

/// Keeps the stops strictly inside a box and everything that serves them.
///
/// Trips keep only their stop times inside the box, so a trip crossing the
/// edge is cut to the part within it.
#[derive(Debug, Clone)]
pub struct LocationFilter {
    bounds: BoundingBox,
}

impl LocationFilter {
    pub fn new(bounds: BoundingBox) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

impl Filter for LocationFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Location
    }

    fn derive(&self, input: &dyn EntityGraph) -> Overrides {
        let stops = closure::select(input.stops(), |stop| {
            stop.coordinate
                .is_some_and(|coordinate| self.bounds.contains(&coordinate))
        });
        let stop_times = closure::select(input.stop_times(), |stop_time| {
            stops.contains(&stop_time.stop_id)
        });

        let trip_ids = closure::project(stop_times.items(), |stop_time| {
            Some(stop_time.trip_id.clone())
        });
        let trips = closure::select(input.trips(), |trip| trip_ids.contains(&trip.id));

        let route_ids = closure::project(trips.items(), |trip| Some(trip.route_id.clone()));
        let routes = closure::select(input.routes(), |route| route_ids.contains(&route.id));

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_strict() {
        let bounds = BoundingBox::new(5.0, 5.0, 25.0, 25.0).unwrap();
        assert!(bounds.contains(&Coordinate::new(10.0, 10.0)));
        assert!(bounds.contains(&Coordinate::new(20.0, 20.0)));
        assert!(!bounds.contains(&Coordinate::new(30.0, 30.0)));
        assert!(!bounds.contains(&Coordinate::new(25.0, 25.0)));
        assert!(!bounds.contains(&Coordinate::new(25.0, 10.0)));
        assert!(!bounds.contains(&Coordinate::new(10.0, 25.0)));
        assert!(!bounds.contains(&Coordinate::new(5.0, 10.0)));
    }

    #[test]
    fn parses_colon_separated_corners() {
        let bounds: BoundingBox = "51.0:3.5:51.2:3.9".parse().unwrap();
        assert_eq!(bounds, BoundingBox::new(51.0, 3.5, 51.2, 3.9).unwrap());
        let bounds: BoundingBox = "-34.1:-58.6:-34.0:-58.3".parse().unwrap();
        assert_eq!(bounds.min_lon, -58.6);
        assert_eq!(bounds.to_string(), "-34.1:-58.6:-34:-58.3");
    }

    #[test]
    fn rejects_malformed_boxes() {
        assert_eq!(
            "1:2:3".parse::<BoundingBox>(),
            Err(Error::InvalidBoundingBox("1:2:3".into()))
        );
        assert_eq!(
            "1:x:3:4".parse::<BoundingBox>(),
            Err(Error::InvalidCoordinate("x".into()))
        );
        assert!(matches!(
            BoundingBox::new(10.0, 0.0, 5.0, 1.0),
            Err(Error::InvalidBoundingBox(_))
        ));
        assert!(matches!(
            BoundingBox::new(0.0, 0.0, 0.0, 1.0),
            Err(Error::InvalidBoundingBox(_))
        ));
        assert!(matches!(
            BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0),
            Err(Error::InvalidCoordinate(_))
        ));
    }
}
