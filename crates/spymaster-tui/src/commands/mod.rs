mod fetch;
mod tui;

use std::sync::Arc;

use spymaster_core::{ClientConfig, DemoHttpClient, StockBackend};

use crate::cli::{Cli, Command, TuiArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.client_config()?;
    let backend = backend_for(cli.mock, &config);
    tracing::debug!(
        base_url = config.base_url(),
        timeout_ms = config.timeout_ms(),
        include_news = config.include_news(),
        mock = backend.is_mock(),
        "resolved client config"
    );

    match &cli.command {
        Some(Command::Fetch(args)) => fetch::run(args, &backend, config.include_news()).await,
        Some(Command::Tui(args)) => tui::run(args, backend, config.include_news()).await,
        None => tui::run(&TuiArgs::default(), backend, config.include_news()).await,
    }
}

/// Demo transport under `--mock`, reqwest otherwise.
pub fn backend_for(mock: bool, config: &ClientConfig) -> StockBackend {
    if mock {
        StockBackend::new(config, Arc::new(DemoHttpClient::new()))
    } else {
        StockBackend::with_reqwest(config)
    }
}
