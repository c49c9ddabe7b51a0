use clap::Parser;
use gtfs_filter::filter::{self, BoundingBox, DateRange};
use std::path::PathBuf;

/// Cut a GTFS feed down by bounding box, date range or transport mode
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the filtered feed is written to
    #[arg(short, long, default_value = "output/")]
    pub output: PathBuf,

    /// Keep stops strictly inside minLat:minLon:maxLat:maxLon
    #[arg(short, long, allow_hyphen_values = true, value_name = "LAT:LON:LAT:LON")]
    pub location: Option<BoundingBox>,

    /// Keep service on a day or an inclusive start:end range (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE|START:END")]
    pub date: Option<DateRange>,

    /// Keep routes of these types, by name (tram, bus, ...) or route type code
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = filter::parse_mode,
        value_name = "TYPE,..."
    )]
    pub types: Vec<i32>,

    /// GTFS feed, a zip archive or a directory
    pub input: PathBuf,
}
