use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ttweetcli")]
#[command(about = "Trivial twitter client")]
#[command(version)]
pub struct Cli {
    /// Server address, e.g. 127.0.0.1
    pub server_host: String,

    pub server_port: u16,

    /// Name to validate with; must not already be connected
    pub username: String,
}
