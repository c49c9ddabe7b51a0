use std::{fmt::Display, sync::Arc};

/// Composite identifier qualifying a feed id with the agency that owns it.
///
/// Equality and hashing are structural, so two ids read from different rows
/// compare equal whenever their parts do.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgencyAndId {
    pub agency_id: Arc<str>,
    pub id: Arc<str>,
}

impl AgencyAndId {
    pub fn new(agency_id: impl Into<Arc<str>>, id: impl Into<Arc<str>>) -> Self {
        Self {
            agency_id: agency_id.into(),
            id: id.into(),
        }
    }
}

impl Display for AgencyAndId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.agency_id, self.id)
    }
}

#[test]
fn structural_equality_test() {
    use std::collections::HashSet;

    let a = AgencyAndId::new("DL", String::from("route-1"));
    let b = AgencyAndId::new(String::from("DL"), "route-1");
    assert_eq!(a, b);

    let set: HashSet<_> = [a].into_iter().collect();
    assert!(set.contains(&b));
    assert!(!set.contains(&AgencyAndId::new("NMBS", "route-1")));
}

#[test]
fn display_test() {
    assert_eq!(AgencyAndId::new("DL", "42").to_string(), "DL_42");
}
