//! Past/upcoming classification of shows
//!
//! A show is upcoming iff it starts strictly after the evaluation instant.
//! Everything else, the boundary instant included, is past, so the two
//! classes partition every show with no gap.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Upcoming,
    Past,
}

impl ShowTiming {
    pub fn classify(start_time: &DateTime<Utc>, now: &DateTime<Utc>) -> Self {
        if start_time > now {
            Self::Upcoming
        } else {
            Self::Past
        }
    }
}

/// Shows split by timing. Each side keeps the input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub upcoming: Vec<T>,
    pub past: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            upcoming: Vec::new(),
            past: Vec::new(),
        }
    }
}

/// Split `items` by the start time `start_of` reads from each one.
pub fn partition<T, F>(items: Vec<T>, now: &DateTime<Utc>, start_of: F) -> Partitioned<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut out = Partitioned::default();
    for item in items {
        match ShowTiming::classify(&start_of(&item), now) {
            ShowTiming::Upcoming => out.upcoming.push(item),
            ShowTiming::Past => out.past.push(item),
        }
    }
    out
}

/// Number of start times strictly after `now`.
pub fn count_upcoming<'a, I>(starts: I, now: &DateTime<Utc>) -> i64
where
    I: IntoIterator<Item = &'a DateTime<Utc>>,
{
    starts
        .into_iter()
        .filter(|s| ShowTiming::classify(s, now) == ShowTiming::Upcoming)
        .count() as i64
}
