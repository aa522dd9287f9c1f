use std::io;

use spymaster_core::StockBackend;
use tokio::runtime::Handle;

use crate::app::App;
use crate::cli::TuiArgs;
use crate::error::CliError;
use crate::terminal::TerminalSession;

pub async fn run(args: &TuiArgs, backend: StockBackend, include_news: bool) -> Result<(), CliError> {
    let runtime = Handle::current();
    let initial = args.ticker.clone();

    tokio::task::spawn_blocking(move || -> Result<(), CliError> {
        let mut app = App::new(backend, include_news, runtime);
        if let Some(ticker) = initial {
            app.submit(&ticker);
        }

        let mut session = TerminalSession::enter()?;
        app.run(session.terminal_mut())?;
        Ok(())
    })
    .await
    .map_err(|e| CliError::Io(io::Error::other(e)))?
}
