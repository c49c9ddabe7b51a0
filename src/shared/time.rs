use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;

/// Seconds since the start of the service day (noon minus twelve hours).
/// Values past `24:00:00` are legal for trips running after midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Time {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub fn to_hms_string(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    pub fn from_hms(time: &str) -> Option<Self> {
        const HOUR_TO_SEC: u32 = 60 * 60;
        const MINUTE_TO_SEC: u32 = 60;
        let mut split = time.trim().split(':');
        let hours: u32 = split.next()?.parse().ok()?;
        let hours = hours.checked_mul(HOUR_TO_SEC)?;
        let minutes: u32 = split.next()?.parse().ok()?;
        let minutes = minutes.checked_mul(MINUTE_TO_SEC)?;
        let seconds: u32 = split.next()?.parse().ok()?;
        if split.next().is_some() {
            return None;
        }
        let seconds = hours.checked_add(minutes)?.checked_add(seconds)?;
        Some(Self(seconds))
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hms_string())
    }
}

/// A calendar day of service, day granularity.
///
/// Feeds spell it `YYYYMMDD`; [`ServiceDate::from_str`] additionally takes the
/// ISO `YYYY-MM-DD` form, which is what people tend to type on a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceDate(NaiveDate);

impl ServiceDate {
    const GTFS_FORMAT: &'static str = "%Y%m%d";
    const ISO_FORMAT: &'static str = "%Y-%m-%d";

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the strict `YYYYMMDD` form used inside feeds.
    pub fn from_gtfs(date: &str) -> Option<Self> {
        let date = date.trim();
        if date.len() != 8 {
            return None;
        }
        NaiveDate::parse_from_str(date, Self::GTFS_FORMAT)
            .ok()
            .map(Self)
    }

    pub fn to_gtfs_string(&self) -> String {
        self.0.format(Self::GTFS_FORMAT).to_string()
    }

    pub const fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ServiceDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for ServiceDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(date) = Self::from_gtfs(s) {
            return Ok(date);
        }
        NaiveDate::parse_from_str(s, Self::ISO_FORMAT).map(Self)
    }
}

impl Display for ServiceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_gtfs_string())
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_2() {
    let time = "12:30:30";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_past_midnight() {
    let time = "25:10:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(stime.as_seconds(), 25 * 3600 + 600);
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn valid_time_single_digit_hour() {
    assert_eq!(Time::from_hms("8:05:00").unwrap().as_seconds(), 8 * 3600 + 300);
}

#[test]
fn invalid_time_test_1() {
    assert!(Time::from_hms("00:00:0a").is_none())
}

#[test]
fn invalid_time_test_2() {
    assert!(Time::from_hms("00:00").is_none())
}

#[test]
fn invalid_time_test_3() {
    assert!(Time::from_hms("00:00:00:00").is_none())
}

#[test]
fn invalid_time_test_4() {
    assert!(Time::from_hms("4294967:00:00").is_none());
    assert!(Time::from_hms("1193046:71582788:00").is_none());
    assert!(Time::from_hms("1193046:28:4294967295").is_none());
}

#[test]
fn service_date_gtfs_round_trip() {
    let date = ServiceDate::from_gtfs("20200131").unwrap();
    assert_eq!(date, ServiceDate::from_ymd(2020, 1, 31).unwrap());
    assert_eq!(date.to_string(), "20200131");
}

#[test]
fn service_date_rejects_garbage() {
    assert!(ServiceDate::from_gtfs("2020-01-31").is_none());
    assert!(ServiceDate::from_gtfs("20201341").is_none());
    assert!(ServiceDate::from_gtfs("2020013").is_none());
}

#[test]
fn service_date_from_str_accepts_iso() {
    let date: ServiceDate = "2020-01-10".parse().unwrap();
    assert_eq!(date, ServiceDate::from_ymd(2020, 1, 10).unwrap());
    let date: ServiceDate = "20200110".parse().unwrap();
    assert_eq!(date, ServiceDate::from_ymd(2020, 1, 10).unwrap());
    assert!("10/01/2020".parse::<ServiceDate>().is_err());
}

#[test]
fn service_date_ordering() {
    let a = ServiceDate::from_ymd(2020, 1, 1).unwrap();
    let b = ServiceDate::from_ymd(2020, 2, 1).unwrap();
    assert!(a < b);
    assert_eq!(a.max(b), b);
}
