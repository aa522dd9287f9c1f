use std::sync::Arc;

use spymaster_core::{
    ClientConfig, DemoHttpClient, FixtureHttpClient, HttpClient, HttpResponse, StockBackend,
    Symbol,
};

/// Payloads shaped like the FastAPI backend, extra fields included.
const HISTORY_BODY: &str = r#"{
    "ticker": "BRK.B",
    "data": [
        {"time": 1699920000, "value": 356.1, "volume": 3100000},
        {"time": 1700006400, "value": 357.4, "volume": 2900000}
    ]
}"#;

const NEWS_BODY: &str = r#"[
    {
        "category": "company",
        "datetime": 1700010000,
        "headline": "Berkshire trims stake",
        "id": 125381044,
        "image": "",
        "related": "BRK.B",
        "source": "Yahoo",
        "summary": "Filing shows changes.",
        "url": "https://finnhub.io/api/news?id=1",
        "lang": "en"
    }
]"#;

struct TransportCase {
    name: &'static str,
    client: Arc<dyn HttpClient>,
}

fn transport_cases() -> Vec<TransportCase> {
    vec![
        TransportCase {
            name: "fixture",
            client: Arc::new(
                FixtureHttpClient::new()
                    .route("/v1/stock-history/BRK.B", HttpResponse::ok_json(HISTORY_BODY))
                    .route("/v1/stock-news/BRK.B", HttpResponse::ok_json(NEWS_BODY)),
            ),
        },
        TransportCase {
            name: "demo",
            client: Arc::new(DemoHttpClient::anchored_at(1_700_006_400)),
        },
    ]
}

fn symbol() -> Symbol {
    Symbol::parse("brk.b").expect("valid symbol")
}

#[tokio::test]
async fn history_returns_samples_for_all_transports() {
    for case in transport_cases() {
        let backend = StockBackend::new(&ClientConfig::default(), case.client.clone());
        let samples = backend
            .history(&symbol())
            .await
            .unwrap_or_else(|error| panic!("transport '{}' history failed: {error}", case.name));

        assert!(!samples.is_empty(), "transport '{}': sample count", case.name);
        assert!(
            samples.iter().any(|sample| sample.is_finite()),
            "transport '{}': finite samples",
            case.name
        );
    }
}

#[tokio::test]
async fn news_items_carry_datetime_and_headline_for_all_transports() {
    for case in transport_cases() {
        let backend = StockBackend::new(&ClientConfig::default(), case.client.clone());
        let news = backend
            .news(&symbol())
            .await
            .unwrap_or_else(|error| panic!("transport '{}' news failed: {error}", case.name));

        assert!(!news.is_empty(), "transport '{}': news count", case.name);
        for item in &news {
            assert!(item.datetime > 0, "transport '{}': datetime", case.name);
            assert!(!item.headline.is_empty(), "transport '{}': headline", case.name);
        }
    }
}

#[test]
fn endpoint_urls_follow_backend_routes() {
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:8000/")
        .expect("valid url");
    let backend = StockBackend::new(&config, Arc::new(FixtureHttpClient::new()));

    assert_eq!(
        backend.history_url(&symbol()),
        "http://127.0.0.1:8000/v1/stock-history/BRK.B"
    );
    assert_eq!(
        backend.news_url(&Symbol::parse("^gspc").expect("index")),
        "http://127.0.0.1:8000/v1/stock-news/%5EGSPC"
    );
}
