//! Terminal front-end for spymaster.
//!
//! This crate provides:
//! - The `spymaster` CLI (`tui` and `fetch` commands)
//! - A chart adapter rendering the price series with `ratatui`
//! - Mouse hover tooltips for news markers
//! - Terminal session and logging setup
//!
//! Data shaping lives in `spymaster-core`; everything here is presentation.

pub mod app;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod terminal;
pub mod tooltip;

pub use app::App;
pub use chart::{ChartConfig, ChartHandle, PointerMove, PriceChart};
pub use error::CliError;
