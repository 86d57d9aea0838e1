//! Demo directory: three venues, three artists, five shows
//!
//! Two shows lie in the past and three far enough in the future that the
//! data stays useful for a while.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use gigbook_core::models::{NewArtist, NewShow, NewVenue};
use gigbook_core::Genre;

use crate::store::{DbError, Store};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

fn venues() -> Vec<NewVenue> {
    vec![
        NewVenue {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: Some("123-123-1234".into()),
            genres: vec![Genre::Jazz, Genre::Reggae, Genre::Classical, Genre::Folk],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            website: Some("https://www.themusicalhop.com".into()),
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .into(),
            ),
        },
        NewVenue {
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            phone: Some("914-003-1132".into()),
            genres: vec![Genre::Classical, Genre::RhythmAndBlues, Genre::HipHop],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/theduelingpianos".into()),
            website: Some("https://www.theduelingpianos.com".into()),
            seeking_talent: false,
            seeking_description: None,
        },
        NewVenue {
            name: "Park Square Live Music & Coffee".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "34 Whiskey Moore Ave".into(),
            phone: Some("415-000-1234".into()),
            genres: vec![Genre::RockNRoll, Genre::Jazz, Genre::Classical, Genre::Folk],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into()),
            website: Some("https://www.parksquarelivemusicandcoffee.com".into()),
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn artists() -> Vec<NewArtist> {
    vec![
        NewArtist {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("326-123-5000".into()),
            genres: vec![Genre::RockNRoll],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website: Some("https://www.gunsnpetalsband.com".into()),
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".into(),
            ),
        },
        NewArtist {
            name: "Matt Quevado".into(),
            city: "New York".into(),
            state: "NY".into(),
            phone: Some("300-400-5000".into()),
            genres: vec![Genre::Jazz],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".into()),
            website: None,
            seeking_venue: false,
            seeking_description: None,
        },
        NewArtist {
            name: "The Wild Sax Band".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("432-325-5432".into()),
            genres: vec![Genre::Jazz, Genre::Classical],
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

/// Load the demo directory through `store`.
///
/// Ids are whatever the store assigns, so this also works on a database
/// that already holds rows.
pub async fn load(store: &dyn Store) -> Result<SeedSummary, DbError> {
    let mut summary = SeedSummary::default();

    let mut venue_ids = Vec::new();
    for venue in venues() {
        venue_ids.push(store.create_venue(venue).await?.id);
        summary.venues += 1;
    }

    let mut artist_ids = Vec::new();
    for artist in artists() {
        artist_ids.push(store.create_artist(artist).await?.id);
        summary.artists += 1;
    }

    // (venue index, artist index, start)
    let bookings = [
        (0, 0, at(2019, 5, 21, 21, 30)),
        (2, 1, at(2019, 6, 15, 23, 0)),
        (2, 2, at(2035, 4, 1, 20, 0)),
        (2, 2, at(2035, 4, 8, 20, 0)),
        (2, 2, at(2035, 4, 15, 20, 0)),
    ];
    for (v, a, start_time) in bookings {
        store
            .create_show(NewShow {
                venue_id: venue_ids[v],
                artist_id: artist_ids[a],
                start_time,
            })
            .await?;
        summary.shows += 1;
    }

    tracing::info!(
        venues = summary.venues,
        artists = summary.artists,
        shows = summary.shows,
        "demo data loaded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeds_the_sample_directory() {
        let store = MemoryStore::new();
        let summary = load(&store).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                venues: 3,
                artists: 3,
                shows: 5
            }
        );

        let now = at(2026, 1, 1, 0, 0);
        let areas = gigbook_core::group_by_area(store.venue_summaries(now).await.unwrap());
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 3);
    }

    #[test]
    fn sample_records_pass_their_own_rules() {
        for v in venues() {
            let again = NewVenue::from_form(&v.clone().into_venue(1).to_form()).unwrap();
            assert_eq!(again, v);
        }
        for a in artists() {
            let again = NewArtist::from_form(&a.clone().into_artist(1).to_form()).unwrap();
            assert_eq!(again, a);
        }
    }
}
