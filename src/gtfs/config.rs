use crate::graph::EntityType;

/// File names the reader looks for and the writer produces.
pub struct Config {
    pub agency_file_name: String,
    pub stops_file_name: String,
    pub routes_file_name: String,
    pub trips_file_name: String,
    pub stop_times_file_name: String,
    pub calendar_file_name: String,
    pub calendar_dates_file_name: String,
    pub shapes_file_name: String,
    pub frequencies_file_name: String,
    pub transfers_file_name: String,
    pub fare_attributes_file_name: String,
    pub fare_rules_file_name: String,
    pub pathways_file_name: String,
}

impl Config {
    pub fn file_name(&self, kind: EntityType) -> &str {
        match kind {
            EntityType::Agency => &self.agency_file_name,
            EntityType::Stop => &self.stops_file_name,
            EntityType::Route => &self.routes_file_name,
            EntityType::Trip => &self.trips_file_name,
            EntityType::StopTime => &self.stop_times_file_name,
            EntityType::ServiceCalendar => &self.calendar_file_name,
            EntityType::ServiceCalendarDate => &self.calendar_dates_file_name,
            EntityType::ShapePoint => &self.shapes_file_name,
            EntityType::Frequency => &self.frequencies_file_name,
            EntityType::Transfer => &self.transfers_file_name,
            EntityType::FareAttribute => &self.fare_attributes_file_name,
            EntityType::FareRule => &self.fare_rules_file_name,
            EntityType::Pathway => &self.pathways_file_name,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agency_file_name: "agency.txt".into(),
            stops_file_name: "stops.txt".into(),
            routes_file_name: "routes.txt".into(),
            trips_file_name: "trips.txt".into(),
            stop_times_file_name: "stop_times.txt".into(),
            calendar_file_name: "calendar.txt".into(),
            calendar_dates_file_name: "calendar_dates.txt".into(),
            shapes_file_name: "shapes.txt".into(),
            frequencies_file_name: "frequencies.txt".into(),
            transfers_file_name: "transfers.txt".into(),
            fare_attributes_file_name: "fare_attributes.txt".into(),
            fare_rules_file_name: "fare_rules.txt".into(),
            pathways_file_name: "pathways.txt".into(),
        }
    }
}

#[test]
fn default_file_names_follow_entity_stems() {
    let config = Config::default();
    for kind in EntityType::ALL {
        assert_eq!(config.file_name(kind), format!("{}.txt", kind.file_stem()));
    }
}
