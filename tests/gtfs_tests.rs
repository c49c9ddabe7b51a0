mod common;

use common::*;
use gtfs_filter::{gtfs, prelude::*};
use std::{fs, io::Write, path::Path};
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

const FILES: [(&str, &str); 8] = [
    (
        "agency.txt",
        "agency_id,agency_name,agency_url,agency_timezone\n\
         DL,De Lijn,https://delijn.be,Europe/Brussels\n\
         NMBS,NMBS,https://belgiantrain.be,Europe/Brussels\n",
    ),
    (
        "routes.txt",
        "route_id,agency_id,route_short_name,route_long_name,route_type,route_color\n\
         R1,,1,Gent Sint-Pieters - Evergem,0,\n\
         IC,NMBS,IC,Oostende - Eupen,2,FFCC00\n",
    ),
    (
        "stops.txt",
        "stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station,extra_column\n\
         GSP,Gent Sint-Pieters,51.0357,3.7106,1,,x\n\
         GSP1,Perron 1,51.0356,3.7105,0,GSP,y\n\
         KOR,Korenmarkt,51.0548,3.7215,,,z\n\
         NODE,Node,,,3,GSP,\n",
    ),
    (
        "trips.txt",
        "route_id,service_id,trip_id,trip_headsign,direction_id,shape_id\n\
         R1,WK,T1,Evergem,0,SH1\n\
         IC,WK,T2,Eupen,1,\n",
    ),
    (
        "stop_times.txt",
        "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
         T1,08:00:00,08:00:00,GSP1,1\n\
         T1,,,KOR,2\n\
         T1,08:12:00,08:12:30,GSP,3\n\
         T2,23:55:00,23:56:00,GSP1,1\n\
         T2,25:10:00,25:10:00,KOR,2\n",
    ),
    (
        "calendar.txt",
        "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
         WK,1,1,1,1,1,0,0,20200101,20201231\n",
    ),
    (
        "calendar_dates.txt",
        "service_id,date,exception_type\n\
         WK,20201225,2\n",
    ),
    (
        "shapes.txt",
        "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\n\
         SH1,51.0357,3.7106,1\n\
         SH1,51.0548,3.7215,2\n",
    ),
];

fn write_feed(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn read(path: &Path) -> Result<Repository, gtfs::Error> {
    let reader = GtfsReader::default().from_path(path)?;
    Repository::new().load_gtfs(reader)
}

#[test]
fn load_directory_test() {
    let dir = TempDir::new().unwrap();
    write_feed(dir.path(), &FILES);
    let repository = read(dir.path()).unwrap();

    assert_eq!(repository.agencies().len(), 2);
    assert_eq!(repository.routes().len(), 2);
    assert_eq!(repository.stops().len(), 4);
    assert_eq!(repository.trips().len(), 2);
    assert_eq!(repository.stop_times().len(), 5);
    assert_eq!(repository.calendars().len(), 1);
    assert_eq!(repository.calendar_dates().len(), 1);
    assert_eq!(repository.shape_points().len(), 2);
    assert!(repository.transfers().is_empty());
    assert!(repository.pathways().is_empty());
}

#[test]
fn qualifies_ids_with_agencies_test() {
    let dir = TempDir::new().unwrap();
    write_feed(dir.path(), &FILES);
    let repository = read(dir.path()).unwrap();

    let ic = AgencyAndId::new("NMBS", "IC");
    assert_eq!(repository.route(&ic).unwrap().route_type, 2);
    assert!(repository.route(&AgencyAndId::new("DL", "R1")).is_some());

    let t2 = repository.trip(&AgencyAndId::new("DL", "T2")).unwrap();
    assert_eq!(t2.route_id, ic);
    assert_eq!(t2.service_id, AgencyAndId::new("DL", "WK"));
    assert_eq!(t2.shape_id, None);

    let platform = repository.stop(&AgencyAndId::new("DL", "GSP1")).unwrap();
    assert_eq!(platform.parent_station, Some(AgencyAndId::new("DL", "GSP")));
}

#[test]
fn parses_values_test() {
    let dir = TempDir::new().unwrap();
    write_feed(dir.path(), &FILES);
    let repository = read(dir.path()).unwrap();

    let node = repository.stop(&AgencyAndId::new("DL", "NODE")).unwrap();
    assert_eq!(node.coordinate, None);
    assert_eq!(node.location_type, Some(3));
    let station = repository.stop(&AgencyAndId::new("DL", "GSP")).unwrap();
    assert_eq!(station.coordinate, Some(Coordinate::new(51.0357, 3.7106)));

    let untimed = repository.stop_time(1).unwrap();
    assert_eq!(untimed.arrival_time, None);
    let after_midnight = repository.stop_time(4).unwrap();
    assert_eq!(
        after_midnight.arrival_time,
        Some(Time::from_seconds(25 * 3600 + 10 * 60))
    );

    let calendar = repository.calendar(0).unwrap();
    assert!(calendar.monday && !calendar.sunday);
    assert_eq!(calendar.end_date, date(2020, 12, 31));
    let removed = repository.calendar_date(0).unwrap();
    assert_eq!(removed.exception_type, ExceptionType::Removed);

    let route = repository.route(&AgencyAndId::new("DL", "R1")).unwrap();
    assert_eq!(route.color, None);
    assert_eq!(route.long_name.as_deref(), Some("Gent Sint-Pieters - Evergem"));
}

#[test]
fn load_nested_zip_test() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feed.zip");
    let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
    for (name, content) in FILES {
        zip.start_file(format!("feed/{name}"), SimpleFileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();

    let repository = read(&path).unwrap();
    assert_eq!(repository.stop_times().len(), 5);
    assert_eq!(repository.shape_points().len(), 2);
}

#[test]
fn missing_required_file_test() {
    let dir = TempDir::new().unwrap();
    let without_stop_times: Vec<_> = FILES
        .into_iter()
        .filter(|(name, _)| *name != "stop_times.txt")
        .collect();
    write_feed(dir.path(), &without_stop_times);
    match read(dir.path()) {
        Err(gtfs::Error::MissingFile(name)) => assert_eq!(name, "stop_times.txt"),
        other => panic!("expected a missing file error, got {other:?}"),
    }
}

#[test]
fn invalid_date_test() {
    let dir = TempDir::new().unwrap();
    write_feed(dir.path(), &FILES);
    fs::write(
        dir.path().join("calendar.txt"),
        "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
         WK,1,1,1,1,1,0,0,2020-01-01,20201231\n",
    )
    .unwrap();
    match read(dir.path()) {
        Err(gtfs::Error::InvalidDate { file_name, value }) => {
            assert_eq!(file_name, "calendar.txt");
            assert_eq!(value, "2020-01-01");
        }
        other => panic!("expected an invalid date error, got {other:?}"),
    }
}

#[test]
fn invalid_time_test() {
    let dir = TempDir::new().unwrap();
    write_feed(dir.path(), &FILES);
    fs::write(
        dir.path().join("stop_times.txt"),
        "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
         T1,4294967:00:00,08:00:00,GSP1,1\n",
    )
    .unwrap();
    match read(dir.path()) {
        Err(gtfs::Error::InvalidTime { file_name, value }) => {
            assert_eq!(file_name, "stop_times.txt");
            assert_eq!(value, "4294967:00:00");
        }
        other => panic!("expected an invalid time error, got {other:?}"),
    }
}

#[test]
fn reused_route_id_resolves_to_first_agency_test() {
    let dir = TempDir::new().unwrap();
    write_feed(dir.path(), &FILES);
    fs::write(
        dir.path().join("routes.txt"),
        "route_id,agency_id,route_short_name,route_long_name,route_type,route_color\n\
         X,DL,X,Tram X,0,\n\
         X,NMBS,X,Train X,2,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("trips.txt"),
        "route_id,service_id,trip_id\n\
         X,WK,T1\n\
         X,WK,T2\n",
    )
    .unwrap();
    let repository = read(dir.path()).unwrap();

    assert_eq!(repository.routes().len(), 2);
    assert_eq!(
        repository.route(&AgencyAndId::new("NMBS", "X")).unwrap().route_type,
        2
    );
    let t2 = repository.trip(&AgencyAndId::new("DL", "T2")).unwrap();
    assert_eq!(t2.route_id, AgencyAndId::new("DL", "X"));
}

#[test]
fn malformed_row_test() {
    let dir = TempDir::new().unwrap();
    write_feed(dir.path(), &FILES);
    fs::write(
        dir.path().join("stop_times.txt"),
        "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
         T1,08:00:00,08:00:00,GSP1,first\n",
    )
    .unwrap();
    assert!(matches!(
        read(dir.path()),
        Err(gtfs::Error::Csv { file_name, .. }) if file_name == "stop_times.txt"
    ));
}

#[test]
fn neither_file_nor_directory_test() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nothing-here");
    assert!(matches!(
        GtfsReader::default().from_path(&missing),
        Err(gtfs::Error::NotFileNorDirectory(path)) if path == missing
    ));
}

#[test]
fn written_feed_reads_back_test() {
    let source = feed();
    let dir = TempDir::new().unwrap();
    GtfsWriter::default().write(&source, dir.path()).unwrap();

    let repository = read(dir.path()).unwrap();
    for kind in EntityType::ALL {
        assert_eq!(
            repository.entities(kind).len(),
            source.entities(kind).len(),
            "{kind}"
        );
    }
    assert_eq!(
        repository.trip(&id("T1")).unwrap().as_ref(),
        source.trip(&id("T1")).unwrap().as_ref()
    );
    assert_eq!(
        repository.calendar(0).unwrap().as_ref(),
        source.calendar(0).unwrap().as_ref()
    );
    assert_eq!(
        repository.stop_time(3).unwrap().as_ref(),
        source.stop_time(3).unwrap().as_ref()
    );
}

#[test]
fn writer_skips_empty_kinds_test() {
    let dir = TempDir::new().unwrap();
    let filtered = TimespanFilter::on_day(date(2020, 2, 5)).apply(feed());
    GtfsWriter::default().write(&filtered, dir.path()).unwrap();

    assert!(dir.path().join("stops.txt").is_file());
    assert!(dir.path().join("calendar.txt").is_file());
    assert!(!dir.path().join("calendar_dates.txt").exists());
    assert!(!dir.path().join("transfers.txt").exists());

    let stops = fs::read_to_string(dir.path().join("stops.txt")).unwrap();
    let mut lines = stops.lines();
    assert!(lines.next().unwrap().starts_with("stop_id,stop_code,stop_name"));
    assert_eq!(lines.count(), 2);

    let calendar = fs::read_to_string(dir.path().join("calendar.txt")).unwrap();
    assert!(calendar.contains("FEB,1,1,1,1,1,0,0,20200205,20200205"));
}
