use chrono::{DateTime, Duration, TimeZone, Utc};
use gigbook_core::models::VenueSummary;
use gigbook_core::{group_by_area, name_matches, partition, ShowTiming};
use proptest::prelude::*;

// Small city/state alphabets so groups actually collide
fn arb_summary() -> impl Strategy<Value = (String, String, String, i64)> {
    (
        "[A-Za-z ]{0,12}",
        prop::sample::select(vec!["San Francisco", "New York", "Portland", "portland"]),
        prop::sample::select(vec!["CA", "NY", "OR", "ME"]),
        0i64..5,
    )
        .prop_map(|(name, city, state, n)| (name, city.to_string(), state.to_string(), n))
}

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

proptest! {
    /// Property: grouping then flattening yields every venue exactly once
    #[test]
    fn prop_grouping_flattens_to_input(rows in prop::collection::vec(arb_summary(), 0..60)) {
        let venues: Vec<VenueSummary> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (name, city, state, n))| VenueSummary {
                id: i as i64 + 1,
                name,
                city,
                state,
                num_upcoming_shows: n,
            })
            .collect();

        let areas = group_by_area(venues.clone());

        let mut flattened: Vec<i64> = areas
            .iter()
            .flat_map(|a| a.venues.iter().map(|v| v.id))
            .collect();
        flattened.sort_unstable();
        let expected: Vec<i64> = venues.iter().map(|v| v.id).collect();
        prop_assert_eq!(flattened, expected);

        // Every venue sits in the area matching its own key, and keys are unique
        for v in &venues {
            let area = areas
                .iter()
                .find(|a| a.venues.iter().any(|av| av.id == v.id))
                .unwrap();
            prop_assert_eq!(&area.city, &v.city);
            prop_assert_eq!(&area.state, &v.state);
        }
        for (i, a) in areas.iter().enumerate() {
            for b in &areas[i + 1..] {
                prop_assert!(a.city != b.city || a.state != b.state);
            }
        }
    }

    /// Property: classification is total with the boundary counted as past
    #[test]
    fn prop_timing_partition_is_total(offsets in prop::collection::vec(-10_000i64..10_000, 0..80)) {
        let now = base_instant();
        let starts: Vec<DateTime<Utc>> = offsets
            .iter()
            .map(|s| now + Duration::seconds(*s))
            .collect();

        let split = partition(starts.clone(), &now, |s| *s);

        prop_assert_eq!(split.upcoming.len() + split.past.len(), starts.len());
        prop_assert!(split.upcoming.iter().all(|s| *s > now));
        prop_assert!(split.past.iter().all(|s| *s <= now));
        for s in &starts {
            let expected = if *s > now { ShowTiming::Upcoming } else { ShowTiming::Past };
            prop_assert_eq!(ShowTiming::classify(s, &now), expected);
        }
    }

    /// Property: search is a pure filter and case-insensitive
    #[test]
    fn prop_search_is_case_insensitive(name in "[A-Za-z ]{0,20}", start in 0usize..20, len in 0usize..6) {
        let chars: Vec<char> = name.chars().collect();
        let start = start.min(chars.len());
        let end = (start + len).min(chars.len());
        let term: String = chars[start..end].iter().collect();

        prop_assert!(name_matches(&name, &term));
        prop_assert!(name_matches(&name, &term.to_uppercase()));
        prop_assert!(name_matches(&name.to_lowercase(), &term));
    }
}
