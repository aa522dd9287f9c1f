//! Behavior-driven tests for backend error handling
//!
//! These tests verify HOW transport, status and payload failures are
//! classified, and that a failing fetch never disturbs what is on screen.

use std::sync::Arc;

use spymaster_core::{
    fetch_market_data, BackendErrorKind, ClientConfig, Completion, FixtureHttpClient, HttpError,
    HttpResponse, RawSample, RenderState, StockBackend, Symbol, ValidationError, ViewController,
};

fn backend_with(client: FixtureHttpClient) -> (StockBackend, Arc<FixtureHttpClient>) {
    let client = Arc::new(client);
    let backend = StockBackend::new(&ClientConfig::default(), client.clone());
    (backend, client)
}

fn tsla() -> Symbol {
    Symbol::parse("TSLA").expect("valid")
}

// =============================================================================
// Backend: Failure classification
// =============================================================================

#[tokio::test]
async fn when_backend_reports_error_with_status_200_fetch_fails_as_upstream() {
    // Given: The backend wraps its own failure in a 200 response
    let (backend, _) = backend_with(
        FixtureHttpClient::new()
            .route(
                "/v1/stock-history/TSLA",
                HttpResponse::ok_json(r#"{"error": "Failed to fetch data for TSLA"}"#),
            )
            .route("/v1/stock-news/TSLA", HttpResponse::ok_json("[]")),
    );

    // When: Fetching market data
    let err = fetch_market_data(&backend, &tsla(), true)
        .await
        .expect_err("should fail");

    // Then: The failure is classified as upstream with the backend's message
    assert_eq!(err.kind(), BackendErrorKind::Upstream);
    assert!(err.message().contains("TSLA"));
}

#[tokio::test]
async fn when_news_endpoint_fails_the_whole_fetch_fails() {
    // Given: History succeeds but news returns 500
    let (backend, _) = backend_with(
        FixtureHttpClient::new()
            .route(
                "/v1/stock-history/TSLA",
                HttpResponse::ok_json(r#"{"data": [{"time": 1, "value": 2}]}"#),
            )
            .route("/v1/stock-news/TSLA", HttpResponse::new(500, "boom")),
    );

    // When: Fetching with news
    let err = fetch_market_data(&backend, &tsla(), true)
        .await
        .expect_err("should fail");

    // Then: The status failure surfaces
    assert_eq!(err.kind(), BackendErrorKind::Status);
    assert_eq!(err.code(), "backend.status");
}

#[tokio::test]
async fn when_news_is_disabled_the_news_endpoint_is_never_called() {
    // Given: A broken news endpoint
    let (backend, client) = backend_with(
        FixtureHttpClient::new()
            .route(
                "/v1/stock-history/TSLA",
                HttpResponse::ok_json(r#"{"data": [{"time": 1, "value": 2}]}"#),
            )
            .route_error("/v1/stock-news/TSLA", HttpError::new("unreachable")),
    );

    // When: Fetching the plain variant
    let data = fetch_market_data(&backend, &tsla(), false)
        .await
        .expect("history only");

    // Then: Only the history request was issued
    assert_eq!(data.samples, vec![RawSample::new(1.0, 2.0)]);
    assert!(data.news.is_empty());
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.ends_with("/v1/stock-history/TSLA"));
}

#[tokio::test]
async fn when_backend_is_unreachable_error_is_transport() {
    let (backend, _) = backend_with(
        FixtureHttpClient::new()
            .route_error("/v1/stock-history/TSLA", HttpError::new("connection refused"))
            .route("/v1/stock-news/TSLA", HttpResponse::ok_json("[]")),
    );

    let err = fetch_market_data(&backend, &tsla(), true)
        .await
        .expect_err("should fail");

    assert_eq!(err.kind(), BackendErrorKind::Transport);
}

#[tokio::test]
async fn when_history_body_is_not_json_error_is_payload() {
    let (backend, _) = backend_with(
        FixtureHttpClient::new()
            .route("/v1/stock-history/TSLA", HttpResponse::ok_json("Internal Server Error"))
            .route("/v1/stock-news/TSLA", HttpResponse::ok_json("[]")),
    );

    let err = fetch_market_data(&backend, &tsla(), true)
        .await
        .expect_err("should fail");

    assert_eq!(err.kind(), BackendErrorKind::Payload);
}

// =============================================================================
// View: Stale data on error
// =============================================================================

#[tokio::test]
async fn when_a_later_fetch_fails_previous_chart_stays_visible() {
    // Given: AAPL loaded successfully, MSFT backend broken
    let (backend, _) = backend_with(
        FixtureHttpClient::new()
            .route(
                "/v1/stock-history/AAPL",
                HttpResponse::ok_json(r#"{"data": [{"time": 86400, "value": 190.0}]}"#),
            )
            .route("/v1/stock-news/AAPL", HttpResponse::ok_json("[]"))
            .route("/v1/stock-history/MSFT", HttpResponse::new(503, "unavailable"))
            .route("/v1/stock-news/MSFT", HttpResponse::ok_json("[]")),
    );
    let mut view = ViewController::new();
    let first = view.submit("AAPL").expect("pending");
    let outcome = fetch_market_data(&backend, &first.symbol, true).await;
    assert_eq!(view.complete(first.ticket, outcome), Completion::Applied);

    // When: Searching MSFT fails
    let second = view.submit("MSFT").expect("pending");
    let outcome = fetch_market_data(&backend, &second.symbol, true).await;
    let completion = view.complete(second.ticket, outcome);

    // Then: Loading is cleared and the AAPL chart is still rendered
    assert!(matches!(completion, Completion::Failed(ref err) if err.kind() == BackendErrorKind::Status));
    assert!(!view.is_loading());
    let RenderState::Loaded(chart) = view.render_state() else {
        panic!("previous chart should remain");
    };
    assert_eq!(chart.symbol.as_str(), "AAPL");
    assert_eq!(view.last_symbol().map(Symbol::as_str), Some("MSFT"));
}

// =============================================================================
// Input validation
// =============================================================================

#[tokio::test]
async fn when_ticker_is_digit_led_or_has_a_slash_it_is_fetched_with_an_escaped_path() {
    // Given: A backend that knows Toyota and Berkshire class B
    let (backend, client) = backend_with(
        FixtureHttpClient::new()
            .route(
                "/v1/stock-history/7203.T",
                HttpResponse::ok_json(r#"{"data": [{"time": 86400, "value": 2900.0}]}"#),
            )
            .route(
                "/v1/stock-history/BRK%2FB",
                HttpResponse::ok_json(r#"{"data": [{"time": 86400, "value": 410.0}]}"#),
            ),
    );
    let mut view = ViewController::new();

    for (input, segment) in [("7203.T", "7203.T"), ("brk/b", "BRK%2FB")] {
        // When: Submitting the ticker
        let pending = view.submit(input).expect("non-blank input fetches");
        let outcome = fetch_market_data(&backend, &pending.symbol, false).await;

        // Then: The request path keeps the ticker in one escaped segment
        assert_eq!(view.complete(pending.ticket, outcome), Completion::Applied);
        let requests = client.recorded_requests();
        let last = requests.last().expect("request issued");
        assert!(last.url.ends_with(&format!("/v1/stock-history/{segment}")));
    }
    assert_eq!(client.recorded_requests().len(), 2);
}

#[test]
fn when_ticker_looks_like_a_parent_path_it_stays_one_segment() {
    let mut view = ViewController::new();

    let pending = view.submit("../admin").expect("non-blank input fetches");
    let backend = StockBackend::new(&ClientConfig::default(), Arc::new(FixtureHttpClient::new()));

    assert!(backend
        .history_url(&pending.symbol)
        .ends_with("/v1/stock-history/..%2FADMIN"));
}

#[test]
fn when_base_url_is_not_http_config_is_rejected() {
    let result = ClientConfig::from_lookup(|key| {
        (key == "SPYMASTER_BASE_URL").then(|| String::from("file:///etc/passwd"))
    });

    assert!(matches!(result, Err(ValidationError::InvalidBaseUrl { .. })));
}
