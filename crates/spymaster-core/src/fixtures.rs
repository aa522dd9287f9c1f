//! Deterministic demo transport behind `--mock`.
//!
//! Payloads are synthesized from the ticker in the request path, so the same
//! symbol always yields the same chart shape. History spans more than the
//! trailing window and carries one duplicate and one null sample so the
//! normalization path is exercised end to end.

use serde_json::json;

use crate::domain::timestamp::{now_unix, SECS_PER_DAY};
use crate::http_client::{HttpClient, HttpFuture, HttpRequest, HttpResponse};

/// Daily samples generated per history request.
pub const DEMO_HISTORY_DAYS: i64 = 45;

const HEADLINES: [(&str, &str); 4] = [
    ("Reuters", "{} shares move after quarterly results"),
    ("Bloomberg", "Analysts revisit price targets for {}"),
    ("MarketWatch", "{} announces buyback program"),
    ("CNBC", "What traders are watching in {} this week"),
];

#[derive(Debug, Clone)]
pub struct DemoHttpClient {
    anchor: i64,
}

impl DemoHttpClient {
    /// Demo data ending at the current day.
    pub fn new() -> Self {
        Self::anchored_at(now_unix())
    }

    /// Demo data whose newest sample sits on the day containing `unix_secs`.
    pub fn anchored_at(unix_secs: i64) -> Self {
        Self {
            anchor: unix_secs.div_euclid(SECS_PER_DAY) * SECS_PER_DAY,
        }
    }

    fn respond(&self, url: &str) -> HttpResponse {
        let path = url.split('?').next().unwrap_or(url);
        let Some((endpoint, ticker)) = path.rsplit_once('/') else {
            return not_found();
        };
        let ticker = urlencoding::decode(ticker)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| ticker.to_owned());

        if endpoint.ends_with("/v1/stock-history") {
            HttpResponse::ok_json(self.history_body(&ticker))
        } else if endpoint.ends_with("/v1/stock-news") {
            HttpResponse::ok_json(self.news_body(&ticker))
        } else {
            not_found()
        }
    }

    fn history_body(&self, ticker: &str) -> String {
        let seed = symbol_seed(ticker);
        let start = self.anchor - (DEMO_HISTORY_DAYS - 1) * SECS_PER_DAY;
        let drift = if seed % 2 == 0 { 0.35 } else { -0.35 };
        let base = 90.0 + (seed % 350) as f64 / 10.0;

        let mut data: Vec<serde_json::Value> = (0..DEMO_HISTORY_DAYS)
            .map(|day| {
                let wobble = ((seed.wrapping_add(day as u64 * 7)) % 25) as f64 / 10.0 - 1.2;
                let value = base + drift * day as f64 + wobble;
                json!({
                    "time": start + day * SECS_PER_DAY,
                    "value": (value * 100.0).round() / 100.0,
                })
            })
            .collect();

        // Resent sample for the latest day and one hole in the feed.
        if let Some(last) = data.last().cloned() {
            data.push(last);
        }
        data.push(json!({ "time": start + 3 * SECS_PER_DAY, "value": null }));

        json!({ "ticker": ticker, "data": data }).to_string()
    }

    fn news_body(&self, ticker: &str) -> String {
        let seed = symbol_seed(ticker);
        let items: Vec<serde_json::Value> = HEADLINES
            .iter()
            .enumerate()
            .map(|(index, (source, template))| {
                let days_back = (seed.wrapping_add(index as u64 * 5) % 28) as i64;
                let intraday = 9 * 3_600 + (index as i64) * 1_800;
                json!({
                    "id": seed % 100_000 + index as u64,
                    "datetime": self.anchor - days_back * SECS_PER_DAY + intraday,
                    "headline": template.replace("{}", ticker),
                    "source": source,
                    "summary": format!("Demo coverage for {ticker}."),
                    "url": "",
                    "category": "company",
                    "image": "",
                    "related": ticker,
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }
}

impl Default for DemoHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for DemoHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        tracing::debug!(url = %request.url, "serving demo payload");
        let response = self.respond(&request.url);
        Box::pin(async move { Ok(response) })
    }

    fn is_mock(&self) -> bool {
        true
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::new(404, r#"{"detail":"Not Found"}"#)
}

fn symbol_seed(ticker: &str) -> u64 {
    ticker
        .bytes()
        .fold(0_u64, |acc, byte| acc.wrapping_mul(33).wrapping_add(byte as u64))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::StockBackend;
    use crate::config::ClientConfig;
    use crate::series::{normalize, TRAILING_WINDOW_SECS};
    use crate::Symbol;

    const ANCHOR: i64 = 1_700_000_000;

    fn backend() -> StockBackend {
        StockBackend::new(
            &ClientConfig::default(),
            Arc::new(DemoHttpClient::anchored_at(ANCHOR)),
        )
    }

    #[tokio::test]
    async fn history_is_deterministic_per_symbol() {
        let symbol = Symbol::parse("MSFT").expect("symbol");
        let first = backend().history(&symbol).await.expect("history");
        let second = backend().history(&symbol).await.expect("history");
        assert_eq!(first.len(), second.len());
        assert!(first
            .iter()
            .zip(&second)
            .all(|(a, b)| a.time == b.time && (a.value == b.value || a.value.is_nan())));
    }

    #[tokio::test]
    async fn history_normalizes_into_trailing_window() {
        let symbol = Symbol::parse("NVDA").expect("symbol");
        let samples = backend().history(&symbol).await.expect("history");
        let series = normalize(&samples);

        let newest = series.last().expect("non-empty").time;
        assert!(series.len() < samples.len());
        assert!(series
            .iter()
            .all(|point| point.time >= newest - TRAILING_WINDOW_SECS));
    }

    #[tokio::test]
    async fn news_mentions_the_requested_ticker() {
        let symbol = Symbol::parse("^GSPC").expect("symbol");
        let news = backend().news(&symbol).await.expect("news");
        assert_eq!(news.len(), HEADLINES.len());
        assert!(news.iter().all(|event| event.related == "^GSPC"));
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let client = DemoHttpClient::anchored_at(ANCHOR);
        let response = client
            .execute(HttpRequest::get("http://127.0.0.1:8000/v1/quotes/AAPL"))
            .await
            .expect("response");
        assert_eq!(response.status, 404);
        assert!(client.is_mock());
    }
}
