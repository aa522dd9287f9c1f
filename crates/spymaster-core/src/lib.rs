//! Core contracts for spymaster.
//!
//! This crate contains:
//! - Domain models (raw samples, price points, news, symbols)
//! - Trailing-window normalization and trend detection
//! - Alignment of news events onto the price series
//! - HTTP seam, backend client and configuration
//! - View controller driving one ticker search and its chart
//!
//! ## Data flow
//!
//! ```text
//! backend ──► RawSample[] ──► series::normalize ──► PricePoint[] ─┐
//!        └──► NewsEvent[] ─────────────────────────► alignment::align
//!                                                       │
//!                                    markers + by_time ◄┘
//! ```
//!
//! ## Example
//!
//! ```
//! use spymaster_core::{align, normalize, NewsEvent, RawSample};
//!
//! let series = normalize(&[RawSample::new(1_000.0, 10.0), RawSample::new(90_000.0, 11.0)]);
//! let news = [NewsEvent::new(1, 4_600, "Earnings beat", "Reuters")];
//! let alignment = align(&news, &series);
//! assert_eq!(alignment.markers.len(), 1);
//! assert_eq!(alignment.markers[0].time, 1_000);
//! ```

pub mod alignment;
pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod http_client;
pub mod series;
pub mod view;

pub use alignment::{
    align, align_with_tolerance, MarkerAnnotation, MarkerPosition, MarkerShape, MarkerStyle,
    NewsAlignment, NewsByTime, MATCH_TOLERANCE_SECS, NEWS_MARKER_COLOR,
};
pub use backend::{BackendError, BackendErrorKind, StockBackend};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use domain::{NewsEvent, PricePoint, RawSample, Symbol};
pub use error::{CoreError, ValidationError};
pub use fixtures::DemoHttpClient;
pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use series::{normalize, normalize_with_window, Trend, TRAILING_WINDOW_SECS};
pub use view::{
    fetch_chart, fetch_market_data, ChartData, Completion, FetchTicket, MarketData, PendingFetch,
    RenderState, ViewController,
};
