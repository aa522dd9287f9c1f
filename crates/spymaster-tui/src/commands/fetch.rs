use std::io::{self, Write};

use serde::Serialize;
use spymaster_core::{
    fetch_chart, ChartData, MarkerAnnotation, NewsByTime, PricePoint, StockBackend, Symbol, Trend,
};

use crate::cli::FetchArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct FetchOutput<'a> {
    symbol: &'a Symbol,
    trend: Trend,
    color: &'static str,
    points: usize,
    series: &'a [PricePoint],
    markers: &'a [MarkerAnnotation],
    news_by_time: &'a NewsByTime,
}

pub async fn run(args: &FetchArgs, backend: &StockBackend, include_news: bool) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.ticker)?;
    let chart = fetch_chart(backend, &symbol, include_news).await?;

    let rendered = render(&chart, args.pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// JSON document printed by `spymaster fetch`.
pub fn render(chart: &ChartData, pretty: bool) -> Result<String, CliError> {
    let output = FetchOutput {
        symbol: &chart.symbol,
        trend: chart.trend,
        color: chart.line_color(),
        points: chart.series.len(),
        series: &chart.series,
        markers: chart.markers(),
        news_by_time: &chart.alignment.by_time,
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;
    use spymaster_core::{ClientConfig, FixtureHttpClient, HttpResponse};

    use super::*;

    #[tokio::test]
    async fn output_contains_series_markers_and_lookup() {
        let client = FixtureHttpClient::new()
            .route(
                "/v1/stock-history/AAPL",
                HttpResponse::ok_json(
                    r#"{"data": [{"time": 86400, "value": 5.0}, {"time": 172800, "value": 4.0}]}"#,
                ),
            )
            .route(
                "/v1/stock-news/AAPL",
                HttpResponse::ok_json(r#"[{"id": 3, "datetime": 90000, "headline": "Guidance cut", "source": "AP"}]"#),
            );
        let backend = StockBackend::new(&ClientConfig::default(), Arc::new(client));
        let symbol = Symbol::parse("AAPL").expect("valid");
        let chart = fetch_chart(&backend, &symbol, true).await.expect("chart");

        let value: Value = serde_json::from_str(&render(&chart, false).expect("render")).expect("json");

        assert_eq!(value["symbol"], "AAPL");
        assert_eq!(value["trend"], "falling");
        assert_eq!(value["color"], "#FF0000");
        assert_eq!(value["points"], 2);
        assert_eq!(value["markers"][0]["time"], 86400);
        assert_eq!(value["markers"][0]["style"]["shape"], "circle");
        assert_eq!(value["news_by_time"]["86400"]["headline"], "Guidance cut");
    }

    #[tokio::test]
    async fn invalid_ticker_fails_before_any_request() {
        let client = Arc::new(FixtureHttpClient::new());
        let backend = StockBackend::new(&ClientConfig::default(), client.clone());
        let args = FetchArgs {
            ticker: String::from("$$$"),
            pretty: false,
        };

        let err = run(&args, &backend, true).await.expect_err("must fail");

        assert_eq!(err.exit_code(), 2);
        assert!(client.recorded_requests().is_empty());
    }
}
