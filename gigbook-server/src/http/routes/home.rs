//! Landing document

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct Home {
    pub name: &'static str,
    pub links: Vec<Link>,
}

#[derive(Serialize)]
pub struct Link {
    pub rel: &'static str,
    pub href: &'static str,
}

const LINKS: &[(&str, &str)] = &[
    ("venues", "/venues"),
    ("artists", "/artists"),
    ("shows", "/shows"),
    ("new-venue", "/venues/create"),
    ("new-artist", "/artists/create"),
    ("new-show", "/shows/create"),
];

/// GET /
async fn index() -> Json<Home> {
    Json(Home {
        name: "gigbook",
        links: LINKS
            .iter()
            .map(|&(rel, href)| Link { rel, href })
            .collect(),
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
