use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::api;
use crate::client::MovieApi;
use crate::config::Config;
use crate::templates;
use crate::view::FinderView;

/// One local user, so the page state is shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn MovieApi>,
    pub view: Arc<Mutex<FinderView>>,
    pub region: Arc<str>,
}

impl AppState {
    pub fn new(client: Arc<dyn MovieApi>, region: &str) -> Self {
        Self {
            client,
            view: Arc::new(Mutex::new(FinderView::new())),
            region: Arc::from(region),
        }
    }
}

pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/search", get(search_page))
        .route("/select/:id", get(select_page))
        .nest("/api", api::routes(state.clone()))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: &Config, client: Arc<dyn MovieApi>) -> anyhow::Result<()> {
    let state = AppState::new(client, &config.region);
    let app = build_router(state, &config.static_dir);

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_page(State(state): State<AppState>) -> Html<String> {
    let view = state.view.lock().await;
    Html(templates::render_page(&view, &state.region))
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Html<String> {
    // Held across the upstream call, so `GET /` waits for it too.
    let mut view = state.view.lock().await;
    view.submit_search(state.client.as_ref(), &params.q).await;
    Html(templates::render_page(&view, &state.region))
}

async fn select_page(State(state): State<AppState>, Path(id): Path<i64>) -> Html<String> {
    let mut view = state.view.lock().await;
    view.select_movie(state.client.as_ref(), id).await;
    Html(templates::render_page(&view, &state.region))
}
