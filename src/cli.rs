use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eventbox")]
#[command(about = "In-memory ledger event retention store", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $EVENTBOX_CONFIG or config/eventbox.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hold the event store and serve health/status endpoints
    Serve(ServeArgs),
    /// Print the resolved configuration as TOML
    ShowConfig,
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}
