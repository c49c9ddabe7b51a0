mod common;

use common::*;
use gtfs_filter::{graph, prelude::*};

#[test]
fn entities_match_typed_accessors_test() {
    let feed = feed();
    assert_eq!(feed.entities(EntityType::Stop).len(), feed.stops().len());
    assert_eq!(feed.entities(EntityType::StopTime).len(), 7);
    assert_eq!(feed.entities(EntityType::ShapePoint).len(), 5);
    for kind in EntityType::ALL {
        assert_eq!(feed.entities(kind).kind(), kind);
    }
}

#[test]
fn dispatch_by_type_name_test() {
    let feed = feed();
    for name in ["StopTime", "stop_times", "stop_times.txt"] {
        let entities = feed.entities_for_type_name(name).unwrap();
        assert_eq!(entities.kind(), EntityType::StopTime);
        assert_eq!(entities.len(), 7);
    }
    assert!(matches!(
        feed.entities_for_type_name("calendar.txt").unwrap(),
        Entities::Calendars(calendars) if calendars.len() == 2
    ));
}

#[test]
fn unknown_type_name_is_rejected_test() {
    let err = feed().entities_for_type_name("levels").unwrap_err();
    assert_eq!(err, graph::Error::UnknownEntityType("levels".into()));
}

#[test]
fn generic_accessors_test() {
    let feed = feed();
    assert_eq!(feed.all::<Route>().len(), 2);
    assert_eq!(feed.get::<Trip>(&id("T2")).unwrap().route_id, id("BUS"));
    assert!(feed.get::<Stop>(&id("missing")).is_none());
    assert_eq!(feed.get::<StopTime>(&6).unwrap().stop_id, id("S4"));
    assert_eq!(feed.get::<Agency>(&AGENCY.into()).unwrap().name.as_ref(), "Agency");
}

#[test]
fn stage_answers_lookups_from_its_own_output_test() {
    let feed = feed();
    let filtered = ModeFilter::new([0]).unwrap().apply(&feed);
    assert!(filtered.get::<Trip>(&id("T2")).is_none());
    assert!(feed.get::<Trip>(&id("T2")).is_some());
    assert!(filtered.get::<Trip>(&id("T1")).is_some());
    assert!(filtered.get::<FareAttribute>(&id("F1")).is_some());
    assert_eq!(filtered.kind(), FilterKind::Mode);
    assert!(filtered.overrides().agencies.is_none());
    assert!(filtered.overrides().stops.is_some());
}

#[test]
fn boxed_graph_behaves_like_its_content_test() {
    let boxed: Box<dyn EntityGraph> = Box::new(feed());
    assert_eq!(boxed.stops().len(), 6);
    assert_eq!(boxed.all::<Pathway>().len(), 2);
    assert!(boxed.stop(&id("S6")).is_some());
}
