use crate::{
    graph::{Entity, EntityType, Table},
    gtfs::{self, GtfsReader, models::*},
    repository::{
        Agency, ExceptionType, FareAttribute, FareRule, Frequency, Pathway, Repository, Route,
        ServiceCalendar, ServiceCalendarDate, ShapePoint, Stop, StopTime, Transfer, Trip,
    },
    shared::{AgencyAndId, Coordinate, ServiceDate, Time},
};
use serde::de::DeserializeOwned;
use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
    time::Instant,
};
use tracing::{debug, info, warn};

/// Resolves raw feed ids into qualified ones.
///
/// Routes and fares carry their own agency; everything else is owned by the
/// feed's first agency.
#[derive(Default)]
struct Ids {
    agency: Arc<str>,
    routes: HashMap<String, AgencyAndId>,
    fares: HashMap<String, AgencyAndId>,
}

impl Ids {
    fn qualify(&self, id: String) -> AgencyAndId {
        AgencyAndId::new(self.agency.clone(), id)
    }

    fn route(&self, id: String) -> AgencyAndId {
        match self.routes.get(&id) {
            Some(route_id) => route_id.clone(),
            None => self.qualify(id),
        }
    }

    fn fare(&self, id: String) -> AgencyAndId {
        match self.fares.get(&id) {
            Some(fare_id) => fare_id.clone(),
            None => self.qualify(id),
        }
    }

    fn owned_by(&self, agency_id: Option<String>, id: String) -> AgencyAndId {
        match agency_id {
            Some(agency_id) => AgencyAndId::new(agency_id, id),
            None => self.qualify(id),
        }
    }
}

impl Repository {
    pub fn load_gtfs(mut self, gtfs: GtfsReader) -> Result<Self, gtfs::Error> {
        let now = Instant::now();
        let mut ids = Ids::default();
        self.load_agencies(&gtfs, &mut ids)?;
        self.load_routes(&gtfs, &mut ids)?;
        self.load_stops(&gtfs, &ids)?;
        self.load_trips(&gtfs, &ids)?;
        self.load_stop_times(&gtfs, &ids)?;
        self.load_calendars(&gtfs, &ids)?;
        self.load_shapes(&gtfs, &ids)?;
        self.load_frequencies(&gtfs, &ids)?;
        self.load_transfers(&gtfs, &ids)?;
        self.load_fares(&gtfs, &mut ids)?;
        self.load_pathways(&gtfs, &ids)?;
        info!(
            "Loaded {} stops, {} routes, {} trips and {} stop times in {:?}",
            self.stops.len(),
            self.routes.len(),
            self.trips.len(),
            self.stop_times.len(),
            now.elapsed()
        );
        Ok(self)
    }

    fn load_agencies(&mut self, gtfs: &GtfsReader, ids: &mut Ids) -> Result<(), gtfs::Error> {
        self.agencies = read_table(gtfs, |_, agency: GtfsAgency, _| {
            Ok(Some(Agency {
                id: agency.agency_id.unwrap_or_default().into(),
                name: agency.agency_name.into(),
                url: agency.agency_url.into(),
                timezone: agency.agency_timezone.into(),
                lang: agency.agency_lang.map(Into::into),
                phone: agency.agency_phone.map(Into::into),
                fare_url: agency.agency_fare_url.map(Into::into),
                email: agency.agency_email.map(Into::into),
            }))
        })?;
        if let Some(agency) = self.agencies.items().first() {
            ids.agency = agency.id.clone();
        }
        Ok(())
    }

    fn load_routes(&mut self, gtfs: &GtfsReader, ids: &mut Ids) -> Result<(), gtfs::Error> {
        self.routes = read_table(gtfs, |_, route: GtfsRoute, _| {
            let agency_id: Arc<str> = match route.agency_id {
                Some(agency_id) => agency_id.into(),
                None => ids.agency.clone(),
            };
            Ok(Some(Route {
                id: AgencyAndId::new(agency_id.clone(), route.route_id),
                agency_id,
                short_name: route.route_short_name.map(Into::into),
                long_name: route.route_long_name.map(Into::into),
                desc: route.route_desc.map(Into::into),
                route_type: route.route_type,
                url: route.route_url.map(Into::into),
                color: route.route_color.map(Into::into),
                text_color: route.route_text_color.map(Into::into),
            }))
        })?;
        ids.routes = index_raw_ids(self.routes.items().iter().map(|route| &route.id), "route");
        Ok(())
    }

    fn load_stops(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.stops = read_table(gtfs, |_, stop: GtfsStop, _| {
            let coordinate = match (stop.stop_lat, stop.stop_lon) {
                (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
                _ => None,
            };
            Ok(Some(Stop {
                id: ids.qualify(stop.stop_id),
                code: stop.stop_code.map(Into::into),
                name: stop.stop_name.map(Into::into),
                desc: stop.stop_desc.map(Into::into),
                coordinate,
                zone_id: stop.zone_id.map(Into::into),
                url: stop.stop_url.map(Into::into),
                location_type: stop.location_type,
                parent_station: stop.parent_station.map(|id| ids.qualify(id)),
                timezone: stop.stop_timezone.map(Into::into),
                wheelchair_boarding: stop.wheelchair_boarding,
                platform_code: stop.platform_code.map(Into::into),
            }))
        })?;
        Ok(())
    }

    fn load_trips(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.trips = read_table(gtfs, |_, trip: GtfsTrip, _| {
            Ok(Some(Trip {
                id: ids.qualify(trip.trip_id),
                route_id: ids.route(trip.route_id),
                service_id: ids.qualify(trip.service_id),
                shape_id: trip.shape_id.map(|id| ids.qualify(id)),
                headsign: trip.trip_headsign.map(Into::into),
                short_name: trip.trip_short_name.map(Into::into),
                direction_id: trip.direction_id,
                block_id: trip.block_id.map(Into::into),
                wheelchair_accessible: trip.wheelchair_accessible,
                bikes_allowed: trip.bikes_allowed,
            }))
        })?;
        Ok(())
    }

    fn load_stop_times(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.stop_times = read_table(gtfs, |i, stop_time: GtfsStopTime, file_name| {
            Ok(Some(StopTime {
                id: row_id(i, file_name)?,
                trip_id: ids.qualify(stop_time.trip_id),
                stop_id: ids.qualify(stop_time.stop_id),
                sequence: stop_time.stop_sequence,
                arrival_time: parse_optional_time(stop_time.arrival_time, file_name)?,
                departure_time: parse_optional_time(stop_time.departure_time, file_name)?,
                headsign: stop_time.stop_headsign.map(Into::into),
                pickup_type: stop_time.pickup_type,
                drop_off_type: stop_time.drop_off_type,
                shape_dist_traveled: stop_time.shape_dist_traveled,
                timepoint: stop_time.timepoint,
            }))
        })?;
        Ok(())
    }

    fn load_calendars(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.calendars = read_table(gtfs, |i, calendar: GtfsCalendar, file_name| {
            Ok(Some(ServiceCalendar {
                id: row_id(i, file_name)?,
                service_id: ids.qualify(calendar.service_id),
                monday: calendar.monday == 1,
                tuesday: calendar.tuesday == 1,
                wednesday: calendar.wednesday == 1,
                thursday: calendar.thursday == 1,
                friday: calendar.friday == 1,
                saturday: calendar.saturday == 1,
                sunday: calendar.sunday == 1,
                start_date: parse_date(&calendar.start_date, file_name)?,
                end_date: parse_date(&calendar.end_date, file_name)?,
            }))
        })?;

        self.calendar_dates = read_table(gtfs, |i, calendar_date: GtfsCalendarDate, file_name| {
            let Some(exception_type) = ExceptionType::from_code(calendar_date.exception_type)
            else {
                warn!(
                    "Skipping row {i} of {file_name}: unknown exception type {}",
                    calendar_date.exception_type
                );
                return Ok(None);
            };
            Ok(Some(ServiceCalendarDate {
                id: row_id(i, file_name)?,
                service_id: ids.qualify(calendar_date.service_id),
                date: parse_date(&calendar_date.date, file_name)?,
                exception_type,
            }))
        })?;
        Ok(())
    }

    fn load_shapes(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.shape_points = read_table(gtfs, |i, shape: GtfsShape, file_name| {
            Ok(Some(ShapePoint {
                id: row_id(i, file_name)?,
                shape_id: ids.qualify(shape.shape_id),
                sequence: shape.shape_pt_sequence,
                coordinate: Coordinate::new(shape.shape_pt_lat, shape.shape_pt_lon),
                dist_traveled: shape.shape_dist_traveled,
            }))
        })?;
        Ok(())
    }

    fn load_frequencies(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.frequencies = read_table(gtfs, |i, frequency: GtfsFrequency, file_name| {
            Ok(Some(Frequency {
                id: row_id(i, file_name)?,
                trip_id: ids.qualify(frequency.trip_id),
                start_time: parse_time(&frequency.start_time, file_name)?,
                end_time: parse_time(&frequency.end_time, file_name)?,
                headway_secs: frequency.headway_secs,
                exact_times: frequency.exact_times,
            }))
        })?;
        Ok(())
    }

    fn load_transfers(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.transfers = read_table(gtfs, |i, transfer: GtfsTransfer, file_name| {
            Ok(Some(Transfer {
                id: row_id(i, file_name)?,
                from_stop_id: ids.qualify(transfer.from_stop_id),
                to_stop_id: ids.qualify(transfer.to_stop_id),
                from_route_id: transfer.from_route_id.map(|id| ids.route(id)),
                to_route_id: transfer.to_route_id.map(|id| ids.route(id)),
                from_trip_id: transfer.from_trip_id.map(|id| ids.qualify(id)),
                to_trip_id: transfer.to_trip_id.map(|id| ids.qualify(id)),
                transfer_type: transfer.transfer_type,
                min_transfer_time: transfer.min_transfer_time,
            }))
        })?;
        Ok(())
    }

    fn load_fares(&mut self, gtfs: &GtfsReader, ids: &mut Ids) -> Result<(), gtfs::Error> {
        self.fare_attributes = read_table(gtfs, |_, fare: GtfsFareAttribute, _| {
            Ok(Some(FareAttribute {
                id: ids.owned_by(fare.agency_id.clone(), fare.fare_id),
                price: fare.price,
                currency_type: fare.currency_type.into(),
                payment_method: fare.payment_method,
                transfers: fare.transfers,
                agency_id: fare.agency_id.map(Into::into),
                transfer_duration: fare.transfer_duration,
            }))
        })?;
        ids.fares = index_raw_ids(
            self.fare_attributes.items().iter().map(|fare| &fare.id),
            "fare",
        );

        self.fare_rules = read_table(gtfs, |i, rule: GtfsFareRule, file_name| {
            Ok(Some(FareRule {
                id: row_id(i, file_name)?,
                fare_id: ids.fare(rule.fare_id),
                route_id: rule.route_id.map(|id| ids.route(id)),
                origin_id: rule.origin_id.map(Into::into),
                destination_id: rule.destination_id.map(Into::into),
                contains_id: rule.contains_id.map(Into::into),
            }))
        })?;
        Ok(())
    }

    fn load_pathways(&mut self, gtfs: &GtfsReader, ids: &Ids) -> Result<(), gtfs::Error> {
        self.pathways = read_table(gtfs, |_, pathway: GtfsPathway, _| {
            Ok(Some(Pathway {
                id: ids.qualify(pathway.pathway_id),
                from_stop_id: ids.qualify(pathway.from_stop_id),
                to_stop_id: ids.qualify(pathway.to_stop_id),
                pathway_mode: pathway.pathway_mode,
                is_bidirectional: pathway.is_bidirectional,
                length: pathway.length,
                traversal_time: pathway.traversal_time,
                signposted_as: pathway.signposted_as.map(Into::into),
            }))
        })?;
        Ok(())
    }
}

/// Streams the file holding `T` and converts each row, dropping rows the
/// conversion turns into `None`.
fn read_table<T, R, F>(gtfs: &GtfsReader, mut convert: F) -> Result<Table<T>, gtfs::Error>
where
    T: Entity,
    R: DeserializeOwned,
    F: FnMut(usize, R, &str) -> Result<Option<T>, gtfs::Error>,
{
    let kind: EntityType = T::KIND;
    debug!("Loading {}...", kind.file_stem());
    let now = Instant::now();
    let file_name = gtfs.config().file_name(kind);
    let mut items: Vec<Arc<T>> = Vec::new();
    gtfs.stream(kind, |i, row: R| {
        if let Some(item) = convert(i, row, file_name)? {
            items.push(Arc::new(item));
        }
        Ok(())
    })?;
    debug!("Loading {} took {:?}", kind.file_stem(), now.elapsed());
    Ok(Table::new(items))
}

/// Maps raw ids to their qualified form. When agencies reuse a raw id the
/// first one keeps it.
fn index_raw_ids<'a, I>(qualified: I, what: &str) -> HashMap<String, AgencyAndId>
where
    I: IntoIterator<Item = &'a AgencyAndId>,
{
    let mut index: HashMap<String, AgencyAndId> = HashMap::new();
    for id in qualified {
        match index.entry(id.id.to_string()) {
            Entry::Occupied(first) => warn!(
                "Ambiguous {what} id {}: used by agencies {} and {}, references resolve to {}",
                id.id,
                first.get().agency_id,
                id.agency_id,
                first.get()
            ),
            Entry::Vacant(entry) => {
                entry.insert(id.clone());
            }
        }
    }
    index
}

fn row_id(row: usize, file_name: &str) -> Result<u32, gtfs::Error> {
    u32::try_from(row).map_err(|_| gtfs::Error::TooManyRows {
        file_name: file_name.to_string(),
        row,
    })
}

fn parse_time(value: &str, file_name: &str) -> Result<Time, gtfs::Error> {
    Time::from_hms(value).ok_or_else(|| gtfs::Error::InvalidTime {
        file_name: file_name.to_string(),
        value: value.to_string(),
    })
}

fn parse_optional_time(value: Option<String>, file_name: &str) -> Result<Option<Time>, gtfs::Error> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| parse_time(&value, file_name))
        .transpose()
}

fn parse_date(value: &str, file_name: &str) -> Result<ServiceDate, gtfs::Error> {
    ServiceDate::from_gtfs(value).ok_or_else(|| gtfs::Error::InvalidDate {
        file_name: file_name.to_string(),
        value: value.to_string(),
    })
}
