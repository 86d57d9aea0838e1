//! Request-level tests against the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use gigbook_server::{build_router, seed, AppState, MemoryStore, ServerConfig, Store};

fn app_with(store: Arc<MemoryStore>) -> Router {
    build_router(AppState::new(store), &ServerConfig::default())
}

fn app() -> Router {
    app_with(Arc::new(MemoryStore::new()))
}

async fn seeded_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    seed::load(store.as_ref()).await.unwrap();
    app_with(store)
}

fn encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn post_form(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encode(pairs)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

const MUSICAL_HOP: &[(&str, &str)] = &[
    ("name", "The Musical Hop"),
    ("city", "San Francisco"),
    ("state", "CA"),
    ("address", "1015 Folsom Street"),
    ("phone", "123-123-1234"),
    ("genres", "Jazz"),
    ("genres", "Reggae"),
    ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
];

#[tokio::test]
async fn create_venue_then_view_it() {
    let app = app();

    let (status, body) = send(&app, post_form("/venues/create", MUSICAL_HOP)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["flash"]["message"],
        "Venue The Musical Hop was successfully listed!"
    );
    assert_eq!(body["flash"]["category"], "success");
    let id = body["venue"]["id"].as_i64().unwrap();

    let (status, detail) = send(&app, get(&format!("/venues/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["name"], "The Musical Hop");
    assert_eq!(detail["address"], "1015 Folsom Street");
    assert_eq!(detail["genres"], serde_json::json!(["Jazz", "Reggae"]));
    assert_eq!(detail["past_shows"], serde_json::json!([]));
    assert_eq!(detail["upcoming_shows"], serde_json::json!([]));
    assert_eq!(detail["past_shows_count"], 0);
    assert_eq!(detail["upcoming_shows_count"], 0);
}

#[tokio::test]
async fn invalid_venue_is_rejected_with_values() {
    let app = app();

    let (status, body) = send(
        &app,
        post_form(
            "/venues/create",
            &[("name", "No City"), ("state", "ZZ"), ("genres", "Jazz")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"city"));
    assert!(fields.contains(&"state"));
    assert!(fields.contains(&"address"));
    assert_eq!(body["form"]["fields"][0]["values"][0], "No City");

    let (_, directory) = send(&app, get("/venues")).await;
    assert_eq!(directory["areas"], serde_json::json!([]));
}

#[tokio::test]
async fn failed_write_answers_with_flash() {
    let store = Arc::new(MemoryStore::new());
    store.set_reject_writes(true);
    let app = app_with(store);

    let (status, body) = send(&app, post_form("/venues/create", MUSICAL_HOP)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["flash"]["message"],
        "An error occurred. Venue The Musical Hop could not be listed."
    );
    assert_eq!(body["form"]["form"], "venue");
}

#[tokio::test]
async fn delete_reports_success_flag() {
    let app = app();

    let (status, body) = send(&app, delete("/venues/42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "success": false }));

    let (_, created) = send(&app, post_form("/venues/create", MUSICAL_HOP)).await;
    let id = created["venue"]["id"].as_i64().unwrap();

    let (_, body) = send(&app, delete(&format!("/venues/{id}"))).await;
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, get(&format!("/venues/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_changes_only_listed_fields() {
    let app = app();
    let mut fields = MUSICAL_HOP.to_vec();
    fields.push(("website", "https://www.themusicalhop.com"));
    fields.push(("seeking_talent", "y"));
    let (_, created) = send(&app, post_form("/venues/create", &fields)).await;
    let id = created["venue"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/venues/{id}/edit"),
            &[
                ("name", "The Musical Hop Annex"),
                ("city", "Oakland"),
                ("state", "CA"),
                ("genres", "Folk"),
                ("website", "https://ignored.example.com"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/venues/{id}").as_str()
    );

    let (_, detail) = send(&app, get(&format!("/venues/{id}"))).await;
    assert_eq!(detail["name"], "The Musical Hop Annex");
    assert_eq!(detail["city"], "Oakland");
    assert_eq!(detail["genres"], serde_json::json!(["Folk"]));
    assert_eq!(detail["phone"], Value::Null);
    assert_eq!(detail["facebook_link"], Value::Null);
    assert_eq!(detail["address"], "1015 Folsom Street");
    assert_eq!(detail["website"], "https://www.themusicalhop.com");
    assert_eq!(detail["seeking_talent"], true);
}

#[tokio::test]
async fn invalid_edit_redisplays_the_record_form() {
    let app = app();
    let (_, created) = send(&app, post_form("/venues/create", MUSICAL_HOP)).await;
    let id = created["venue"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        post_form(
            &format!("/venues/{id}/edit"),
            &[("name", "Hop & Annex"), ("state", "CA")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["form"]["form"], "venue_edit");
    assert_eq!(body["form"]["record_id"], id);
    assert_eq!(body["form"]["fields"][0]["values"][0], "Hop & Annex");

    let (_, detail) = send(&app, get(&format!("/venues/{id}"))).await;
    assert_eq!(detail["name"], "The Musical Hop");
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let app = seeded_app().await;

    let (status, form) = send(&app, get("/artists/1/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["form"], "artist_edit");
    assert_eq!(form["record_id"], 1);
    assert_eq!(form["fields"][0]["name"], "name");
    assert_eq!(form["fields"][0]["values"][0], "Guns N Petals");

    let (status, _) = send(&app, get("/venues/99/edit")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let app = seeded_app().await;

    let (_, hits) = send(&app, post_form("/venues/search", &[("search_term", "hop")])).await;
    assert_eq!(hits["count"], 1);
    assert_eq!(hits["data"][0]["name"], "The Musical Hop");
    assert_eq!(hits["search_term"], "hop");

    let (_, hits) = send(&app, post_form("/artists/search", &[("search_term", "Band")])).await;
    assert_eq!(hits["count"], 1);
    assert_eq!(hits["data"][0]["name"], "The Wild Sax Band");
    assert_eq!(hits["data"][0]["num_upcoming_shows"], 3);

    let (_, hits) = send(&app, post_form("/artists/search", &[("search_term", "")])).await;
    assert_eq!(hits["count"], 3);
}

#[tokio::test]
async fn directory_groups_by_area() {
    let app = seeded_app().await;

    let (status, body) = send(&app, get("/venues")).await;
    assert_eq!(status, StatusCode::OK);
    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["city"], "San Francisco");
    assert_eq!(areas[0]["venues"].as_array().unwrap().len(), 2);
    assert_eq!(areas[1]["city"], "New York");

    let total: usize = areas
        .iter()
        .map(|a| a["venues"].as_array().unwrap().len())
        .sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn detail_splits_past_and_upcoming() {
    let app = seeded_app().await;

    let (_, venue) = send(&app, get("/venues/3?format=full")).await;
    assert_eq!(venue["past_shows_count"], 1);
    assert_eq!(venue["upcoming_shows_count"], 3);
    assert_eq!(venue["past_shows"][0]["artist_name"], "Matt Quevado");
    assert_eq!(
        venue["past_shows"][0]["start_time"],
        "2019-06-15T23:00:00.000000Z"
    );
    assert_eq!(
        venue["past_shows"][0]["start_time_display"],
        "Saturday June, 15, 2019 at 11:00PM"
    );

    let (_, artist) = send(&app, get("/artists/1")).await;
    assert_eq!(artist["past_shows"][0]["venue_name"], "The Musical Hop");
    assert!(artist["past_shows"][0].get("start_time_display").is_none());
}

#[tokio::test]
async fn create_show_and_list() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        post_form(
            "/shows/create",
            &[
                ("artist_id", "2"),
                ("venue_id", "2"),
                ("start_time", "2035-05-01 21:00:00"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["flash"]["message"], "Show was successfully listed!");
    assert_eq!(body["show"]["start_time"], "2035-05-01T21:00:00.000000Z");

    let (_, shows) = send(&app, get("/shows")).await;
    let shows = shows.as_array().unwrap();
    assert_eq!(shows.len(), 6);
    assert_eq!(shows[0]["venue_name"], "The Musical Hop");
    assert_eq!(shows[0]["artist_name"], "Guns N Petals");
    assert!(shows
        .iter()
        .any(|s| s["venue_name"] == "The Dueling Pianos Bar" && s["artist_name"] == "Matt Quevado"));
}

#[tokio::test]
async fn show_for_unknown_venue_is_a_field_error() {
    let store = Arc::new(MemoryStore::new());
    seed::load(store.as_ref()).await.unwrap();
    let app = app_with(store.clone());

    let (status, body) = send(
        &app,
        post_form(
            "/shows/create",
            &[
                ("artist_id", "1"),
                ("venue_id", "404"),
                ("start_time", "2035-05-01T21:00"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "venue_id");
    assert_eq!(store.list_shows().await.unwrap().len(), 5);
}

#[tokio::test]
async fn bad_ids_and_unknown_routes_are_404() {
    let app = app();

    for uri in ["/venues/abc", "/venues/0", "/artists/-1", "/artists/7", "/nowhere"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "not_found", "{uri}");
    }
}

#[tokio::test]
async fn forms_and_health() {
    let app = app();

    let (status, form) = send(&app, get("/venues/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["form"], "venue");
    assert!(form["choices"]["genres"]
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g == "Hip-Hop"));

    let (_, form) = send(&app, get("/shows/create")).await;
    assert_eq!(form["form"], "show");
    assert!(form["fields"][2]["values"][0].as_str().unwrap().ends_with('Z'));

    let (_, health) = send(&app, get("/health")).await;
    assert_eq!(health["status"], "ok");

    let (status, home) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["name"], "gigbook");
}

#[tokio::test]
async fn malformed_requests_answer_with_json_errors() {
    let app = seeded_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/venues/create")
        .body(Body::from("name=Nowhere"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("Content-Type"));

    let (status, body) = send(&app, get("/venues/1?format=bogus")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = send(&app, get("/shows?format=bogus")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
