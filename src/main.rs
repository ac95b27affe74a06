use std::env;
use std::io;
use std::pin::pin;
use std::process::ExitCode;

use points_ledger::SharedLedger;
use points_ledger::csv::read_commands;
use points_ledger::json::write_response;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        error!("usage: points-ledger <commands.csv>");
        return ExitCode::FAILURE;
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let commands = match read_commands(path) {
        Ok(commands) => commands,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let ledger = SharedLedger::new();
    let (command_sender, command_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            // rejected deposits are answered like any other ledger rejection
            let request = match result.map_err(|e| e.into_rejection()) {
                Ok(command) => Ok(command),
                Err(Ok(rejection)) => Err(rejection),
                Err(Err(e)) => {
                    warn!("{e}");
                    continue;
                }
            };
            if command_sender.send(request).await.is_err() {
                break;
            }
        }
    });

    let mut responses = pin!(ledger.run(ReceiverStream::new(command_receiver)));
    let stdout = io::stdout();

    while let Some(result) = responses.next().await {
        if let Err(e) = &result {
            warn!("{e}");
        }
        if let Err(e) = write_response(&mut stdout.lock(), &result) {
            error!("failed to write response: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
