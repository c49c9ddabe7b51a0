use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A WGS84 position as found in `stops.txt` and `shapes.txt`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

#[test]
fn coordinate_tuple_test() {
    let coordinate = Coordinate::from((51.05, 3.72));
    assert_eq!(coordinate.latitude, 51.05);
    assert_eq!(coordinate.longitude, 3.72);
    assert_eq!(<(f64, f64)>::from(coordinate), (51.05, 3.72));
}

#[test]
fn coordinate_finite_test() {
    assert!(Coordinate::new(0.0, 0.0).is_finite());
    assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
    assert!(!Coordinate::new(0.0, f64::INFINITY).is_finite());
}
