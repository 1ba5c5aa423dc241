//! ttweetcli - trivial twitter client
//!
//! ```bash
//! ttweetcli 127.0.0.1 13000 alice
//! tweet "hello world" #news#weather
//! subscribe #news
//! timeline
//! exit
//! ```

use tt_cli::{Cli, Client, ClientCommand, ClientError, render_response};
use tt_core::HashtagValidator;

use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ClientError::Rejected { message, .. }) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let mut client = Client::connect(&cli.server_host, cli.server_port, &cli.username).await?;
    client.validate().await?;
    println!("Username legal. Connection established.");

    let validator = HashtagValidator::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            // stdin closed: leave the same way `exit` would
            Ok(None) => break,
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                break;
            }
        };

        let command = match ClientCommand::parse(&line, &validator) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        if command == ClientCommand::Exit {
            break;
        }

        let response = client.send(&command.to_request()).await?;
        for output in render_response(&response) {
            println!("{output}");
        }
    }

    client.exit().await?;
    println!("Exiting client...");
    Ok(())
}
