//! View state for one ticker search box and its chart.
//!
//! [`ViewController`] is synchronous: `submit` hands out a [`PendingFetch`],
//! the caller runs [`fetch_market_data`] wherever it likes and feeds the
//! outcome back through `complete`. Each submission is fenced by a
//! [`FetchTicket`]; only the newest ticket may change what is displayed.

use serde::Serialize;

use crate::alignment::{self, MarkerAnnotation, NewsAlignment};
use crate::backend::{BackendError, StockBackend};
use crate::series::{self, Trend};
use crate::{NewsEvent, PricePoint, RawSample, Symbol};

/// Everything the chart needs for one loaded ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub symbol: Symbol,
    pub series: Vec<PricePoint>,
    pub trend: Trend,
    pub news: Vec<NewsEvent>,
    pub alignment: NewsAlignment,
}

impl ChartData {
    /// Normalize `samples`, align `news` onto the result and derive the trend.
    pub fn build(symbol: Symbol, samples: &[RawSample], news: Vec<NewsEvent>) -> Self {
        let series = series::normalize(samples);
        let alignment = alignment::align(&news, &series);
        let trend = Trend::of(&series);
        Self {
            symbol,
            series,
            trend,
            news,
            alignment,
        }
    }

    pub fn markers(&self) -> &[MarkerAnnotation] {
        &self.alignment.markers
    }

    /// News shown when hovering the bucket at `time`.
    pub fn tooltip_at(&self, time: i64) -> Option<&NewsEvent> {
        self.alignment.news_at(time)
    }

    pub fn line_color(&self) -> &'static str {
        self.trend.hex_color()
    }
}

/// Raw payloads of one successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    pub samples: Vec<RawSample>,
    pub news: Vec<NewsEvent>,
}

/// Sequence number of a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// A submission accepted by the controller, waiting to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub symbol: Symbol,
}

/// What `complete` did with a fetch outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// New chart data is displayed.
    Applied,
    /// The fetch failed; previous data, if any, stays on screen.
    Failed(BackendError),
    /// A newer submission exists; the outcome was discarded.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderState<'a> {
    Idle,
    Loading,
    Loaded(&'a ChartData),
}

#[derive(Debug, Default)]
pub struct ViewController {
    loading: bool,
    last_symbol: Option<Symbol>,
    result: Option<ChartData>,
    has_queried: bool,
    latest: FetchTicket,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept raw input from the search box.
    ///
    /// Blank input is ignored (`None`); anything else starts a fetch.
    pub fn submit(&mut self, input: &str) -> Option<PendingFetch> {
        let symbol = Symbol::parse(input).ok()?;

        self.latest = FetchTicket(self.latest.0 + 1);
        self.loading = true;
        self.last_symbol = Some(symbol.clone());
        tracing::info!(%symbol, ticket = self.latest.0, "fetching market data");

        Some(PendingFetch {
            ticket: self.latest,
            symbol,
        })
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<MarketData, BackendError>,
    ) -> Completion {
        if ticket != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest.0,
                "discarding stale fetch result"
            );
            return Completion::Stale;
        }

        self.loading = false;
        let Some(symbol) = self.last_symbol.clone() else {
            return Completion::Stale;
        };

        match outcome {
            Ok(data) => {
                let chart = ChartData::build(symbol, &data.samples, data.news);
                tracing::info!(
                    symbol = %chart.symbol,
                    points = chart.series.len(),
                    markers = chart.markers().len(),
                    "market data loaded"
                );
                self.result = Some(chart);
                self.has_queried = true;
                Completion::Applied
            }
            Err(err) => {
                tracing::error!(%symbol, code = err.code(), error = %err, "fetch failed");
                Completion::Failed(err)
            }
        }
    }

    pub fn render_state(&self) -> RenderState<'_> {
        if self.loading {
            return RenderState::Loading;
        }
        match (&self.result, self.has_queried) {
            (Some(chart), true) => RenderState::Loaded(chart),
            _ => RenderState::Idle,
        }
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_symbol(&self) -> Option<&Symbol> {
        self.last_symbol.as_ref()
    }

    pub fn result(&self) -> Option<&ChartData> {
        self.result.as_ref()
    }

    pub const fn has_queried(&self) -> bool {
        self.has_queried
    }

    pub const fn latest_ticket(&self) -> FetchTicket {
        self.latest
    }
}

/// Fetch history and, when `include_news` is set, news concurrently.
pub async fn fetch_market_data(
    backend: &StockBackend,
    symbol: &Symbol,
    include_news: bool,
) -> Result<MarketData, BackendError> {
    if !include_news {
        let samples = backend.history(symbol).await?;
        return Ok(MarketData {
            samples,
            news: Vec::new(),
        });
    }

    let (samples, news) = tokio::try_join!(backend.history(symbol), backend.news(symbol))?;
    Ok(MarketData { samples, news })
}

/// One-shot fetch straight into chart data.
pub async fn fetch_chart(
    backend: &StockBackend,
    symbol: &Symbol,
    include_news: bool,
) -> Result<ChartData, BackendError> {
    let data = fetch_market_data(backend, symbol, include_news).await?;
    Ok(ChartData::build(symbol.clone(), &data.samples, data.news))
}
