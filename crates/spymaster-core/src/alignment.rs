//! Alignment of news events onto the normalized price series.
//!
//! Every event snaps to the nearest bucket (series timestamp) if it lies
//! strictly within [`MATCH_TOLERANCE_SECS`]. The first event landing in a
//! bucket claims its marker; the last one wins the tooltip lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::timestamp::SECS_PER_DAY;
use crate::domain::{NewsEvent, PricePoint};

/// Maximum distance (exclusive) between a news event and its bucket.
pub const MATCH_TOLERANCE_SECS: i64 = SECS_PER_DAY;

/// Marker colour used for news annotations.
pub const NEWS_MARKER_COLOR: &str = "#f59e0b";

/// Marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    ArrowDown,
}

/// Vertical placement of a marker relative to its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPosition {
    InBar,
    AboveBar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: String,
    pub shape: MarkerShape,
    pub position: MarkerPosition,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: String::from(NEWS_MARKER_COLOR),
            shape: MarkerShape::Circle,
            position: MarkerPosition::InBar,
        }
    }
}

/// Visual annotation at one bucket of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerAnnotation {
    pub time: i64,
    pub label: String,
    pub style: MarkerStyle,
}

impl MarkerAnnotation {
    pub fn news(time: i64) -> Self {
        Self {
            time,
            label: String::from("News"),
            style: MarkerStyle::default(),
        }
    }
}

/// Bucket time → news event shown on hover.
pub type NewsByTime = BTreeMap<i64, NewsEvent>;

/// Markers plus the tooltip lookup derived from one news batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsAlignment {
    pub markers: Vec<MarkerAnnotation>,
    pub by_time: NewsByTime,
}

impl NewsAlignment {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.by_time.is_empty()
    }

    /// News to show for a hovered bucket.
    pub fn news_at(&self, time: i64) -> Option<&NewsEvent> {
        self.by_time.get(&time)
    }
}

/// Align `news` onto `series` with the default one-day tolerance.
pub fn align(news: &[NewsEvent], series: &[PricePoint]) -> NewsAlignment {
    align_with_tolerance(news, series, MATCH_TOLERANCE_SECS)
}

/// Align `news` onto `series`, accepting matches closer than `tolerance_secs`.
pub fn align_with_tolerance(
    news: &[NewsEvent],
    series: &[PricePoint],
    tolerance_secs: i64,
) -> NewsAlignment {
    if news.is_empty() || series.is_empty() {
        return NewsAlignment::default();
    }

    let mut alignment = NewsAlignment::default();

    for event in news {
        let Some((closest, distance)) = nearest_bucket(series, event.datetime) else {
            continue;
        };

        if distance >= i128::from(tolerance_secs) {
            tracing::trace!(
                headline = %event.headline,
                distance,
                "news event too far from any bucket"
            );
            continue;
        }

        tracing::debug!(headline = %event.headline, bucket = closest, "matched news event");
        alignment.by_time.insert(closest, event.clone());

        if !alignment.markers.iter().any(|marker| marker.time == closest) {
            alignment.markers.push(MarkerAnnotation::news(closest));
        }
    }

    alignment.markers.sort_by_key(|marker| marker.time);
    alignment
}

/// Linear scan; on a tie the earliest bucket wins.
fn nearest_bucket(series: &[PricePoint], target: i64) -> Option<(i64, i128)> {
    let mut best: Option<(i64, i128)> = None;
    for point in series {
        let distance = (i128::from(target) - i128::from(point.time)).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((point.time, distance)),
        }
    }
    best
}
