mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use eventbox::api::{self, AppState};
use eventbox::config::Config;
use eventbox::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    init_tracing(&config.telemetry.log_filter);

    match cli.command {
        Commands::Serve(args) => {
            let address = args.address.unwrap_or(config.server.bind_addr);
            info!(
                label = %config.store.label,
                retention_window = config.store.retention_window,
                "Starting event store"
            );
            let state = AppState::from_config(&config)?;
            api::run(address, state).await?
        }
        Commands::ShowConfig => print!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}
