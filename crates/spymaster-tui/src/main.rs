use std::process::ExitCode;

use clap::Parser;
use spymaster_tui::cli::Cli;
use spymaster_tui::error::CliError;
use spymaster_tui::{commands, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init(&cli.log_target())?;
    commands::run(&cli).await
}
