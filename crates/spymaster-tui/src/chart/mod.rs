//! Chart adapter.
//!
//! [`ChartHandle`] owns one chart instance: the data it plots, the screen
//! area it occupies and the pointer-move subscribers. The widget itself is
//! stateless and rebuilt every frame from the handle.
//!
//! Cell layout inside the chart area:
//!
//! ```text
//! ┌ AAPL ───────────────────────────┐
//! │  192.00 ⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⣀⠤⠒⠉ │
//! │  190.75 ⠀⠀⠀⠀⠀⠀⠀⠀•⠤⠒⠉⠁⠀⠀⠀⠀⠀⠀⠀ │  <- plot area
//! │  189.50 ⣀⠤⠒⠉⠁⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀ │
//! │         11-14 00:00   11-16 00:00 │  <- time labels
//! └──────────────────────────────────┘
//! ```

mod widget;

pub use widget::PriceChart;

use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use ratatui::widgets::Block;
use spymaster_core::domain::timestamp::SECS_PER_DAY;
use spymaster_core::{ChartData, MarkerAnnotation, NewsByTime, NewsEvent, PricePoint};
use tokio::sync::mpsc;

/// Columns reserved left of the plot for price labels.
pub const Y_LABEL_WIDTH: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    /// Maximum rows the chart may occupy, borders included.
    pub height: u16,
    /// Line colour as `#rrggbb`.
    pub color: String,
    /// Draw a horizontal line at the last price.
    pub show_price_line: bool,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 24,
            color: String::from(spymaster_core::Trend::Unknown.hex_color()),
            show_price_line: true,
            title: String::new(),
        }
    }
}

impl ChartConfig {
    pub fn for_chart(chart: &ChartData) -> Self {
        Self {
            color: String::from(chart.line_color()),
            title: chart.symbol.to_string(),
            ..Self::default()
        }
    }
}

/// Pointer position over the chart, snapped to the nearest bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMove {
    pub column: u16,
    pub row: u16,
    /// `None` outside the plot area or when nothing is plotted.
    pub time: Option<i64>,
}

#[derive(Debug)]
pub struct ChartHandle {
    area: Rect,
    config: ChartConfig,
    series: Vec<PricePoint>,
    markers: Vec<MarkerAnnotation>,
    lookup: NewsByTime,
    subscribers: Vec<mpsc::UnboundedSender<PointerMove>>,
    destroyed: bool,
}

impl ChartHandle {
    pub fn create(area: Rect, config: ChartConfig) -> Self {
        tracing::debug!(?area, title = %config.title, "chart created");
        Self {
            area,
            config,
            series: Vec::new(),
            markers: Vec::new(),
            lookup: NewsByTime::new(),
            subscribers: Vec::new(),
            destroyed: false,
        }
    }

    /// Replace plotted data. Applying the same state twice is a no-op.
    pub fn update(&mut self, series: &[PricePoint], markers: &[MarkerAnnotation], lookup: &NewsByTime) {
        self.series = series.to_vec();
        self.markers = markers.to_vec();
        self.lookup = lookup.clone();
    }

    pub fn configure(&mut self, config: ChartConfig) {
        self.config = config;
    }

    /// Push everything from `chart` into the handle.
    pub fn show(&mut self, chart: &ChartData) {
        self.configure(ChartConfig::for_chart(chart));
        self.update(&chart.series, chart.markers(), &chart.alignment.by_time);
    }

    pub fn resize(&mut self, area: Rect) {
        let height = area.height.min(self.config.height);
        self.area = Rect { height, ..area };
    }

    pub fn subscribe_pointer_move(&mut self) -> mpsc::UnboundedReceiver<PointerMove> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Map a pointer position and notify subscribers.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let event = PointerMove {
            column,
            row,
            time: self.time_at(column, row),
        };
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// News stored for the bucket at `time`.
    pub fn news_at(&self, time: i64) -> Option<&NewsEvent> {
        self.lookup.get(&time)
    }

    /// Nearest bucket under the given cell, if it lies in the plot.
    pub fn time_at(&self, column: u16, row: u16) -> Option<i64> {
        let plot = plot_area(self.area)?;
        if !plot.contains(Position::new(column, row)) {
            return None;
        }
        let (lo, hi) = time_bounds(&self.series)?;

        let span = f64::from(plot.width.saturating_sub(1).max(1));
        let fraction = f64::from(column - plot.x) / span;
        let target = lo + fraction * (hi - lo);

        let idx = self.series.partition_point(|point| (point.time as f64) < target);
        let after = self.series.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.series.get(i));
        match (before, after) {
            (Some(b), Some(a)) if target - b.time as f64 <= a.time as f64 - target => Some(b.time),
            (_, Some(a)) => Some(a.time),
            (Some(b), None) => Some(b.time),
            (None, None) => None,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn widget(&self) -> PriceChart<'_> {
        PriceChart::new(&self.series)
            .markers(&self.markers)
            .title(&self.config.title)
            .color(hex_color(&self.config.color))
            .price_line(self.config.show_price_line)
    }

    /// Drop subscribers and plotted data.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.subscribers.clear();
        self.series.clear();
        self.markers.clear();
        self.lookup.clear();
        self.destroyed = true;
        tracing::debug!("chart destroyed");
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Plot rectangle inside a bordered chart `area`.
pub(crate) fn plot_area(area: Rect) -> Option<Rect> {
    let inner = Block::bordered().inner(area);
    if inner.width <= Y_LABEL_WIDTH + 1 || inner.height < 2 {
        return None;
    }
    Some(Rect::new(
        inner.x + Y_LABEL_WIDTH,
        inner.y,
        inner.width - Y_LABEL_WIDTH,
        inner.height - 1,
    ))
}

/// X bounds fitted to the data; a lone point gets a one-day span.
pub(crate) fn time_bounds(series: &[PricePoint]) -> Option<(f64, f64)> {
    let first = series.first()?.time as f64;
    let last = series.last()?.time as f64;
    if first < last {
        Some((first, last))
    } else {
        let half = (SECS_PER_DAY / 2) as f64;
        Some((first - half, last + half))
    }
}

pub(crate) fn hex_color(hex: &str) -> Color {
    hex.parse().unwrap_or(Color::Blue)
}
