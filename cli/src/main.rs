use anyhow::Result;
use clap::Parser;
use config::ObservabilityConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{Cli, Commands};

// RUST_LOG wins over the configured level when set.
fn init_logging(obs: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(obs.logging_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    if obs.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Metadata is static; it must not require a credential.
    if let Commands::Metadata(args) = cli.command {
        return commands::metadata::run(args);
    }

    let cfg = cli.config.load()?;
    init_logging(&cfg.observability);

    match cli.command {
        Commands::Sync(args) => commands::sync::run(args, &cfg).await,
        Commands::Validate(args) => commands::validate::run(args, &cfg).await,
        Commands::Grant(cmd) => commands::grant::run(cmd, &cfg).await,
        Commands::Revoke(cmd) => commands::revoke::run(cmd, &cfg).await,
        Commands::Account(cmd) => commands::account::run(cmd, &cfg).await,
        Commands::Metadata(_) => Ok(()),
    }
}
