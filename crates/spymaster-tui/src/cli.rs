//! CLI argument definitions for spymaster.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tui` | Interactive chart (default when no command is given) |
//! | `fetch` | Print the normalized series, markers and news lookup as JSON |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `http://127.0.0.1:8000` | Backend base URL |
//! | `--timeout-ms` | `3000` | Request timeout in ms |
//! | `--no-news` | `false` | Skip the news endpoint |
//! | `--mock` | `false` | Serve deterministic demo data |
//! | `--log-file` | none | Append tracing output to a file |
//!
//! Flags override the `SPYMASTER_*` environment variables.
//!
//! # Examples
//!
//! ```bash
//! spymaster tui AAPL
//! spymaster --mock fetch MSFT --pretty
//! RUST_LOG=debug spymaster --log-file spymaster.log
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spymaster_core::{ClientConfig, ValidationError};

use crate::logging::LogTarget;

/// Terminal stock chart with news markers.
#[derive(Debug, Parser)]
#[command(
    name = "spymaster",
    author,
    version,
    about = "Terminal stock chart with news markers",
    long_about = "Type a ticker to chart its last 30 days of prices. News items from the \
backend are pinned to the nearest trading day and shown when hovering the marker."
)]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Only fetch price history.
    #[arg(long, global = true, default_value_t = false)]
    pub no_news: bool,

    /// Serve deterministic demo data instead of calling the backend.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Append logs to this file. In the TUI logs are dropped otherwise.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive chart.
    ///
    ///   spymaster tui
    ///   spymaster tui AAPL
    Tui(TuiArgs),

    /// Fetch one ticker and print the chart data as JSON.
    ///
    ///   spymaster fetch AAPL --pretty
    Fetch(FetchArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct TuiArgs {
    /// Ticker to load at startup.
    pub ticker: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    pub ticker: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    /// Environment-derived config with flag overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig, ValidationError> {
        self.apply_overrides(ClientConfig::from_env()?)
    }

    pub fn apply_overrides(&self, mut config: ClientConfig) -> Result<ClientConfig, ValidationError> {
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone())?;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms)?;
        }
        if self.no_news {
            config = config.with_news(false);
        }
        Ok(config)
    }

    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, &self.command) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Some(Command::Fetch(_))) => LogTarget::Stderr,
            (None, _) => LogTarget::Discard,
        }
    }
}
