use serde::Serialize;
use std::{fs, path::Path, sync::Arc, time::Instant};
use tracing::{debug, info};

use crate::{
    graph::{Entities, EntityGraph, EntityType},
    gtfs::{self, Config, models::*},
    repository::{
        Agency, FareAttribute, FareRule, Frequency, Pathway, Route, ServiceCalendar,
        ServiceCalendarDate, ShapePoint, Stop, StopTime, Transfer, Trip,
    },
};

/// Serializes any [`EntityGraph`] back into GTFS text files.
#[derive(Default)]
pub struct GtfsWriter {
    config: Config,
}

impl GtfsWriter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Writes one file per non-empty kind into `dir`, creating it if needed.
    pub fn write<G, P>(&self, graph: &G, dir: P) -> Result<(), gtfs::Error>
    where
        G: EntityGraph + ?Sized,
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let now = Instant::now();
        for kind in EntityType::ALL {
            let entities = graph.entities(kind);
            if entities.is_empty() {
                continue;
            }
            let file_name = self.config.file_name(kind);
            let path = dir.join(file_name);
            let written = match entities {
                Entities::Agencies(items) => write_rows::<GtfsAgency, _>(&path, file_name, items),
                Entities::ShapePoints(items) => write_rows::<GtfsShape, _>(&path, file_name, items),
                Entities::Routes(items) => write_rows::<GtfsRoute, _>(&path, file_name, items),
                Entities::Stops(items) => write_rows::<GtfsStop, _>(&path, file_name, items),
                Entities::Trips(items) => write_rows::<GtfsTrip, _>(&path, file_name, items),
                Entities::StopTimes(items) => {
                    write_rows::<GtfsStopTime, _>(&path, file_name, items)
                }
                Entities::Calendars(items) => {
                    write_rows::<GtfsCalendar, _>(&path, file_name, items)
                }
                Entities::CalendarDates(items) => {
                    write_rows::<GtfsCalendarDate, _>(&path, file_name, items)
                }
                Entities::FareAttributes(items) => {
                    write_rows::<GtfsFareAttribute, _>(&path, file_name, items)
                }
                Entities::FareRules(items) => {
                    write_rows::<GtfsFareRule, _>(&path, file_name, items)
                }
                Entities::Frequencies(items) => {
                    write_rows::<GtfsFrequency, _>(&path, file_name, items)
                }
                Entities::Pathways(items) => write_rows::<GtfsPathway, _>(&path, file_name, items),
                Entities::Transfers(items) => {
                    write_rows::<GtfsTransfer, _>(&path, file_name, items)
                }
            }?;
            info!("Wrote {written} rows to {file_name}");
        }
        debug!("Writing feed took {:?}", now.elapsed());
        Ok(())
    }
}

fn write_rows<R, T>(path: &Path, file_name: &str, items: &[Arc<T>]) -> Result<usize, gtfs::Error>
where
    R: Serialize + for<'a> From<&'a T>,
{
    let csv_error = |source| gtfs::Error::Csv {
        file_name: file_name.to_string(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for item in items {
        writer
            .serialize(R::from(item.as_ref()))
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(items.len())
}

fn text(value: &Option<Arc<str>>) -> Option<String> {
    value.as_deref().map(str::to_string)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&Agency> for GtfsAgency {
    fn from(value: &Agency) -> Self {
        Self {
            agency_id: non_empty(&value.id),
            agency_name: value.name.to_string(),
            agency_url: value.url.to_string(),
            agency_timezone: value.timezone.to_string(),
            agency_lang: text(&value.lang),
            agency_phone: text(&value.phone),
            agency_fare_url: text(&value.fare_url),
            agency_email: text(&value.email),
        }
    }
}

impl From<&Route> for GtfsRoute {
    fn from(value: &Route) -> Self {
        Self {
            route_id: value.id.id.to_string(),
            agency_id: non_empty(&value.agency_id),
            route_short_name: text(&value.short_name),
            route_long_name: text(&value.long_name),
            route_desc: text(&value.desc),
            route_type: value.route_type,
            route_url: text(&value.url),
            route_color: text(&value.color),
            route_text_color: text(&value.text_color),
        }
    }
}

impl From<&Stop> for GtfsStop {
    fn from(value: &Stop) -> Self {
        Self {
            stop_id: value.id.id.to_string(),
            stop_code: text(&value.code),
            stop_name: text(&value.name),
            stop_desc: text(&value.desc),
            stop_lat: value.coordinate.map(|c| c.latitude),
            stop_lon: value.coordinate.map(|c| c.longitude),
            zone_id: text(&value.zone_id),
            stop_url: text(&value.url),
            location_type: value.location_type,
            parent_station: value.parent_station.as_ref().map(|p| p.id.to_string()),
            stop_timezone: text(&value.timezone),
            wheelchair_boarding: value.wheelchair_boarding,
            platform_code: text(&value.platform_code),
        }
    }
}

impl From<&Trip> for GtfsTrip {
    fn from(value: &Trip) -> Self {
        Self {
            route_id: value.route_id.id.to_string(),
            service_id: value.service_id.id.to_string(),
            trip_id: value.id.id.to_string(),
            trip_headsign: text(&value.headsign),
            trip_short_name: text(&value.short_name),
            direction_id: value.direction_id,
            block_id: text(&value.block_id),
            shape_id: value.shape_id.as_ref().map(|s| s.id.to_string()),
            wheelchair_accessible: value.wheelchair_accessible,
            bikes_allowed: value.bikes_allowed,
        }
    }
}

impl From<&StopTime> for GtfsStopTime {
    fn from(value: &StopTime) -> Self {
        Self {
            trip_id: value.trip_id.id.to_string(),
            arrival_time: value.arrival_time.map(|t| t.to_hms_string()),
            departure_time: value.departure_time.map(|t| t.to_hms_string()),
            stop_id: value.stop_id.id.to_string(),
            stop_sequence: value.sequence,
            stop_headsign: text(&value.headsign),
            pickup_type: value.pickup_type,
            drop_off_type: value.drop_off_type,
            shape_dist_traveled: value.shape_dist_traveled,
            timepoint: value.timepoint,
        }
    }
}

impl From<&ServiceCalendar> for GtfsCalendar {
    fn from(value: &ServiceCalendar) -> Self {
        Self {
            service_id: value.service_id.id.to_string(),
            monday: value.monday.into(),
            tuesday: value.tuesday.into(),
            wednesday: value.wednesday.into(),
            thursday: value.thursday.into(),
            friday: value.friday.into(),
            saturday: value.saturday.into(),
            sunday: value.sunday.into(),
            start_date: value.start_date.to_gtfs_string(),
            end_date: value.end_date.to_gtfs_string(),
        }
    }
}

impl From<&ServiceCalendarDate> for GtfsCalendarDate {
    fn from(value: &ServiceCalendarDate) -> Self {
        Self {
            service_id: value.service_id.id.to_string(),
            date: value.date.to_gtfs_string(),
            exception_type: value.exception_type.code(),
        }
    }
}

impl From<&ShapePoint> for GtfsShape {
    fn from(value: &ShapePoint) -> Self {
        Self {
            shape_id: value.shape_id.id.to_string(),
            shape_pt_lat: value.coordinate.latitude,
            shape_pt_lon: value.coordinate.longitude,
            shape_pt_sequence: value.sequence,
            shape_dist_traveled: value.dist_traveled,
        }
    }
}

impl From<&Frequency> for GtfsFrequency {
    fn from(value: &Frequency) -> Self {
        Self {
            trip_id: value.trip_id.id.to_string(),
            start_time: value.start_time.to_hms_string(),
            end_time: value.end_time.to_hms_string(),
            headway_secs: value.headway_secs,
            exact_times: value.exact_times,
        }
    }
}

impl From<&Transfer> for GtfsTransfer {
    fn from(value: &Transfer) -> Self {
        Self {
            from_stop_id: value.from_stop_id.id.to_string(),
            to_stop_id: value.to_stop_id.id.to_string(),
            from_route_id: value.from_route_id.as_ref().map(|r| r.id.to_string()),
            to_route_id: value.to_route_id.as_ref().map(|r| r.id.to_string()),
            from_trip_id: value.from_trip_id.as_ref().map(|t| t.id.to_string()),
            to_trip_id: value.to_trip_id.as_ref().map(|t| t.id.to_string()),
            transfer_type: value.transfer_type,
            min_transfer_time: value.min_transfer_time,
        }
    }
}

impl From<&FareAttribute> for GtfsFareAttribute {
    fn from(value: &FareAttribute) -> Self {
        Self {
            fare_id: value.id.id.to_string(),
            price: value.price,
            currency_type: value.currency_type.to_string(),
            payment_method: value.payment_method,
            transfers: value.transfers,
            agency_id: text(&value.agency_id),
            transfer_duration: value.transfer_duration,
        }
    }
}

impl From<&FareRule> for GtfsFareRule {
    fn from(value: &FareRule) -> Self {
        Self {
            fare_id: value.fare_id.id.to_string(),
            route_id: value.route_id.as_ref().map(|r| r.id.to_string()),
            origin_id: text(&value.origin_id),
            destination_id: text(&value.destination_id),
            contains_id: text(&value.contains_id),
        }
    }
}

impl From<&Pathway> for GtfsPathway {
    fn from(value: &Pathway) -> Self {
        Self {
            pathway_id: value.id.id.to_string(),
            from_stop_id: value.from_stop_id.id.to_string(),
            to_stop_id: value.to_stop_id.id.to_string(),
            pathway_mode: value.pathway_mode,
            is_bidirectional: value.is_bidirectional,
            length: value.length,
            traversal_time: value.traversal_time,
            signposted_as: text(&value.signposted_as),
        }
    }
}
