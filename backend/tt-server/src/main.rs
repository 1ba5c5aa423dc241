//! ttweetsrv - trivial twitter server
//!
//! ```bash
//! ttweetsrv 13000
//! ```

use tt_config::Config;
use tt_server::{Server, ServerError, logger, session_limits};
use tt_session::SessionState;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(name = "ttweetsrv", version, about = "Trivial twitter server")]
struct Args {
    /// Port to listen on (overrides server.port from config)
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ttweetsrv: {e}");
            error!("Server stopped: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let mut config = Config::load()?;
    config.server.port = args.port;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_deref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir)?;
    }

    // Logger comes first so everything below is captured
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ttweetsrv v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let state = SessionState::new(session_limits(&config));
    let server = Server::bind(&config.bind_addr(), state.clone()).await?;
    info!("Server listening on {}", server.local_addr()?);

    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    server.run().await?;
    info!("Graceful shutdown complete");

    Ok(())
}
