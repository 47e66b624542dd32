use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{MovieDetails, SearchResultItem},
    web::AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/movies/search", get(search))
        .route("/movies/:id", get(get_movie_details))
        .with_state(state)
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResultItem>>, AppError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Query is required".to_string()));
    }
    let results = state.client.search(query).await?;
    Ok(Json(results))
}

async fn get_movie_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDetails>, AppError> {
    let movie = state.client.fetch_details(id).await?;
    Ok(Json(movie))
}
