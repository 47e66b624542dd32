//! In-process stand-in for the movie metadata API.
//!
//! Serves `/api/movies/search` and `/api/movies/{id}` from a fixed catalog.
//! The query `error` makes search answer 500 so callers can exercise their
//! failure path.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const FAILING_QUERY: &str = "error";

pub type Catalog = Arc<Vec<Value>>;

pub fn catalog() -> Vec<Value> {
    vec![
        json!({
            "tmdbId": 157336,
            "title": "Interstellar",
            "overview": "The adventures of a group of explorers who make use of a newly discovered wormhole to surpass the limitations on human space travel and conquer the vast distances involved in an interstellar voyage.",
            "runtime": 169,
            "rating": 8.4,
            "releaseDate": "2014-11-05",
            "genres": ["Adventure", "Drama", "Science Fiction"],
            "posterUrl": "https://image.tmdb.org/t/p/w500/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
            "backdropUrl": "https://image.tmdb.org/t/p/original/xJHokMbljvjADYdit5fK5VQsXEG.jpg",
            "providers": [
                {"providerName": "Netflix", "type": "subscription"},
                {"providerName": "Apple TV", "type": "rent"}
            ]
        }),
        json!({
            "tmdbId": 1064213,
            "title": "Leo",
            "overview": "An ordinary Kashmiri cafe owner is pulled back into a violent past.",
            "runtime": 164,
            "rating": 6.9,
            "releaseDate": "2023-10-19",
            "genres": ["Action", "Thriller"],
            "posterUrl": "https://image.tmdb.org/t/p/w500/leo.jpg",
            "providers": [{"providerName": "Netflix", "type": "subscription"}]
        }),
        json!({
            "tmdbId": 887357,
            "title": "Kantara",
            "rating": null,
            "releaseDate": "2022-09-30",
            "genres": [],
            "providers": []
        }),
        json!({
            "tmdbId": 1000001,
            "title": "Leopard Rising"
        }),
    ]
}

pub fn app() -> Router {
    let catalog: Catalog = Arc::new(catalog());
    let api = Router::new()
        .route("/movies/search", get(search))
        .route("/movies/:id", get(details))
        .with_state(catalog);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
}

const SUMMARY_FIELDS: [&str; 6] = ["tmdbId", "title", "releaseDate", "rating", "overview", "posterUrl"];

fn summary(movie: &Value) -> Value {
    let mut out = serde_json::Map::new();
    for field in SUMMARY_FIELDS {
        if let Some(value) = movie.get(field) {
            out.insert(field.to_string(), value.clone());
        }
    }
    Value::Object(out)
}

async fn search(
    State(catalog): State<Catalog>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let needle = params.query.trim().to_lowercase();
    if needle == FAILING_QUERY {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let hits = catalog
        .iter()
        .filter(|movie| {
            movie["title"]
                .as_str()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
        })
        .map(summary)
        .collect();
    Ok(Json(hits))
}

async fn details(
    State(catalog): State<Catalog>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    catalog
        .iter()
        .find(|movie| movie["tmdbId"].as_i64() == Some(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
