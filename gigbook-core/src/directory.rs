//! Venue directory: venues grouped by city and state

use std::collections::HashMap;

use serde::Serialize;

use crate::models::VenueSummary;

/// Venue entry inside an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues sharing one exact `(city, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

/// Group venues by exact `(city, state)`.
///
/// Areas appear in the order their first venue appears in `venues`;
/// venues inside an area keep input order. Keys are compared as-is, so
/// "San Francisco" and "san francisco" are different areas.
pub fn group_by_area(venues: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for v in venues {
        let key = (v.city.clone(), v.state.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            areas.push(Area {
                city: v.city.clone(),
                state: v.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });
        areas[slot].venues.push(AreaVenue {
            id: v.id,
            name: v.name,
            num_upcoming_shows: v.num_upcoming_shows,
        });
    }

    areas
}
