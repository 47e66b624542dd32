//! State behind the search screen and the details panel.
//!
//! Every front end drives a `FinderView` through `begin_*` / `finish_*`
//! pairs so it can redraw while the single request for an action is in
//! flight. `submit_search` and `select_movie` run a whole action.

use tracing::{error, info};

use crate::client::MovieApi;
use crate::error::AppError;
use crate::models::{MovieDetails, SearchResultItem};

pub const SEARCH_FAILED: &str = "Failed to fetch movies. Please try again.";
pub const DETAILS_FAILED: &str = "Failed to fetch movie details. Please try again.";

/// Derived from the flags; the view does not store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    ResultsShown,
    DetailLoading,
    DetailShown,
}

#[derive(Debug, Clone, Default)]
pub struct FinderView {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub selected_id: Option<i64>,
    pub selected: Option<MovieDetails>,
    pub loading: bool,
    pub details_loading: bool,
    pub error: Option<String>,
}

impl FinderView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed query to send, or `None` when there is nothing to search for.
    pub fn begin_search(&mut self, text: &str) -> Option<String> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        self.query = query.to_string();
        self.loading = true;
        self.error = None;
        self.selected = None;
        self.selected_id = None;
        Some(self.query.clone())
    }

    // Results from an earlier search stay on failure.
    pub fn finish_search(&mut self, result: Result<Vec<SearchResultItem>, AppError>) {
        match result {
            Ok(results) => {
                info!("Search for {:?} returned {} results", self.query, results.len());
                self.results = results;
            }
            Err(err) => {
                error!("Search for {:?} failed: {}", self.query, err);
                self.error = Some(SEARCH_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    pub fn begin_select(&mut self, tmdb_id: i64) {
        self.details_loading = true;
        self.error = None;
        self.selected_id = Some(tmdb_id);
        self.selected = None;
    }

    pub fn finish_select(&mut self, result: Result<MovieDetails, AppError>) {
        match result {
            Ok(details) => self.selected = Some(details),
            Err(err) => {
                error!("Details for {:?} failed: {}", self.selected_id, err);
                self.error = Some(DETAILS_FAILED.to_string());
            }
        }
        self.details_loading = false;
    }

    /// Returns whether a request was made.
    pub async fn submit_search(&mut self, api: &dyn MovieApi, text: &str) -> bool {
        let Some(query) = self.begin_search(text) else {
            return false;
        };
        let result = api.search(&query).await;
        self.finish_search(result);
        true
    }

    pub async fn select_movie(&mut self, api: &dyn MovieApi, tmdb_id: i64) {
        self.begin_select(tmdb_id);
        let result = api.fetch_details(tmdb_id).await;
        self.finish_select(result);
    }

    pub fn is_active(&self, tmdb_id: i64) -> bool {
        self.selected_id == Some(tmdb_id)
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Searching
        } else if self.details_loading {
            Phase::DetailLoading
        } else if self.selected.is_some() {
            Phase::DetailShown
        } else if !self.results.is_empty() {
            Phase::ResultsShown
        } else {
            Phase::Idle
        }
    }

    pub fn results_placeholder_visible(&self) -> bool {
        self.results.is_empty() && !self.loading
    }
}
