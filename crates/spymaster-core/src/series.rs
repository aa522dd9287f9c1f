//! Windowing and normalization of raw price samples.
//!
//! [`normalize`] is total: malformed samples are dropped, never reported.
//! The output is strictly increasing in time, holds only finite values and
//! covers at most the trailing 30 days before its newest point.

use serde::{Deserialize, Serialize};

use crate::domain::timestamp::SECS_PER_DAY;
use crate::domain::{PricePoint, RawSample};

/// Trailing window kept by [`normalize`], in seconds (30 days).
pub const TRAILING_WINDOW_SECS: i64 = 30 * SECS_PER_DAY;

/// Clean `samples` and keep the trailing 30-day window.
pub fn normalize(samples: &[RawSample]) -> Vec<PricePoint> {
    normalize_with_window(samples, TRAILING_WINDOW_SECS)
}

/// Clean `samples` and keep points with `time >= max_time - window_secs`.
pub fn normalize_with_window(samples: &[RawSample], window_secs: i64) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = samples
        .iter()
        .filter(|sample| sample.is_finite())
        .map(|sample| PricePoint::new(sample.time.floor() as i64, sample.value))
        .collect();

    // Stable, so equal timestamps keep their input order for last-write-wins.
    points.sort_by_key(|point| point.time);

    let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
    for point in points {
        match deduped.last_mut() {
            Some(last) if last.time == point.time => last.value = point.value,
            _ => deduped.push(point),
        }
    }

    let Some(max_time) = deduped.last().map(|point| point.time) else {
        return deduped;
    };
    let min_time = max_time.saturating_sub(window_secs);
    deduped.retain(|point| point.time >= min_time);
    deduped
}

/// Direction of the normalized series, used to colour the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// First value is at most the last value.
    Rising,
    Falling,
    /// Empty series; no comparison possible.
    Unknown,
}

impl Trend {
    pub fn of(series: &[PricePoint]) -> Self {
        match (series.first(), series.last()) {
            (Some(first), Some(last)) if first.value <= last.value => Self::Rising,
            (Some(_), Some(_)) => Self::Falling,
            _ => Self::Unknown,
        }
    }

    pub const fn hex_color(self) -> &'static str {
        match self {
            Self::Rising => "#008000",
            Self::Falling => "#FF0000",
            Self::Unknown => "#2563eb",
        }
    }
}
