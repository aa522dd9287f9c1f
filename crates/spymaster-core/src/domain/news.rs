use serde::{Deserialize, Serialize};

use super::timestamp;

/// Company news item from `/v1/stock-news/{ticker}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsEvent {
    #[serde(default)]
    pub id: i64,
    /// Publication time in unix seconds.
    pub datetime: i64,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub related: String,
}

impl NewsEvent {
    pub fn new(
        id: i64,
        datetime: i64,
        headline: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id,
            datetime,
            headline: headline.into(),
            source: source.into(),
            summary: String::new(),
            url: String::new(),
            category: String::new(),
            image: String::new(),
            related: String::new(),
        }
    }

    /// Publication day as `YYYY-MM-DD` (UTC).
    pub fn published_on(&self) -> String {
        timestamp::format_date(self.datetime)
    }
}
