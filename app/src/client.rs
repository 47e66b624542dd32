use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::AppError;
use crate::models::{MovieDetails, SearchResultItem};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// The two calls the front ends make against the movie API.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, AppError>;
    async fn fetch_details(&self, tmdb_id: i64) -> Result<MovieDetails, AppError>;
}

#[derive(Debug, Clone)]
pub struct MovieClient {
    client: Client,
    base_url: String,
}

impl MovieClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Movie API {} error ({}): {}", what, status, body);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MovieApi for MovieClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, AppError> {
        let url = format!("{}/movies/search", self.base_url);

        debug!("Searching movies for: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;

        self.read_json(response, "search").await
    }

    async fn fetch_details(&self, tmdb_id: i64) -> Result<MovieDetails, AppError> {
        let url = format!("{}/movies/{}", self.base_url, tmdb_id);

        debug!("Fetching movie details for {}", tmdb_id);

        let response = self.client.get(&url).send().await?;

        self.read_json(response, "details").await
    }
}
