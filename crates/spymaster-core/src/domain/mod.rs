//! # Domain Models
//!
//! Canonical types flowing from the backend payload to the chart.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RawSample`] | Unvalidated `{time, value}` from the history endpoint |
//! | [`PricePoint`] | Cleaned, deduplicated point of the normalized series |
//! | [`NewsEvent`] | News item from the news endpoint |
//! | [`Symbol`] | Validated ticker |
//!
//! Raw samples are accepted as-is and cleaned by
//! [`normalize`](crate::series::normalize); symbols are validated at
//! construction.

mod news;
mod sample;
mod symbol;
pub mod timestamp;

pub use news::NewsEvent;
pub use sample::{PricePoint, RawSample};
pub use symbol::Symbol;
