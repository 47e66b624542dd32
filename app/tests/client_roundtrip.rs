//! The real reqwest client against the mock movie API on a random port.

use std::time::Duration;

use ott_finder::client::{MovieApi, MovieClient};
use ott_finder::error::AppError;
use ott_finder::view::{FinderView, Phase, DETAILS_FAILED, SEARCH_FAILED};

async fn start_mock() -> MovieClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_api::run(listener).await.unwrap();
    });
    MovieClient::new(&format!("http://{addr}/api/"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn search_keeps_server_order() {
    let client = start_mock().await;
    let results = client.search("leo").await.unwrap();
    let ids: Vec<i64> = results.iter().map(|m| m.tmdb_id).collect();
    assert_eq!(ids, vec![1064213, 1000001]);
    assert_eq!(results[1].rating_label(), "N/A");
}

#[tokio::test]
async fn query_is_url_encoded() {
    let client = start_mock().await;
    let results = client.search("leopard rising").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title_label(), "Leopard Rising");
}

#[tokio::test]
async fn details_include_providers() {
    let client = start_mock().await;
    let movie = client.fetch_details(157336).await.unwrap();
    assert_eq!(movie.runtime, Some(169));
    assert_eq!(
        movie.provider_labels(),
        vec!["Netflix • subscription", "Apple TV • rent"]
    );
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let client = start_mock().await;
    let err = client.fetch_details(42).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream { status: 404, .. }));

    let err = client.search(mock_api::FAILING_QUERY).await.unwrap_err();
    assert!(matches!(err, AppError::Upstream { status: 500, .. }));
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MovieClient::new(&format!("http://{addr}/api"), Duration::from_secs(2)).unwrap();
    let err = client.search("leo").await.unwrap_err();
    assert!(matches!(err, AppError::Http(_)));
}

#[tokio::test]
async fn view_walks_through_a_session() {
    let client = start_mock().await;
    let mut view = FinderView::new();

    assert!(!view.submit_search(&client, "  ").await);
    assert_eq!(view.phase(), Phase::Idle);

    assert!(view.submit_search(&client, "interstellar").await);
    assert_eq!(view.phase(), Phase::ResultsShown);

    view.select_movie(&client, 157336).await;
    assert_eq!(view.phase(), Phase::DetailShown);
    assert!(view.is_active(157336));

    view.select_movie(&client, 42).await;
    assert_eq!(view.error.as_deref(), Some(DETAILS_FAILED));
    assert!(view.is_active(42));

    assert!(view.submit_search(&client, mock_api::FAILING_QUERY).await);
    assert_eq!(view.error.as_deref(), Some(SEARCH_FAILED));
    assert_eq!(view.results.len(), 1);
    assert!(view.selected_id.is_none());
}
