//! tt-cli library
//!
//! Command parsing and the framed TCP client used by `ttweetcli`.

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod command;
pub(crate) mod output;


pub use cli::Cli;
pub use client::{CliClientResult, Client, ClientError};
pub use command::{ClientCommand, CommandError, USAGE};
pub use output::render_response;
