pub mod account;
pub mod grant;
pub mod metadata;
pub mod resolve;
pub mod revoke;
pub mod sync;
pub mod validate;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use client::FaultlineClient;
use connector::Connector;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "faultline-connector",
    author,
    version,
    about = "Faultline governance connector",
    long_about = "Mirrors the Faultline organization/team/project hierarchy into \
                  resources, entitlements, and grants, and reconciles membership \
                  changes back to Faultline.\n\nConfiguration comes from \
                  FAULTLINE_* environment variables, an optional config file, \
                  and command-line flags, in increasing precedence."
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands
}

/// Global configuration flags, merged over the file/env configuration.
#[derive(Args)]
pub struct ConfigArgs {
    /// Path to a TOML or YAML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API token (overrides FAULTLINE_API_TOKEN)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// API root URL
    #[arg(long, global = true)]
    pub base_url: Option<String>
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sync the full hierarchy and print the snapshot")]
    Sync(sync::SyncArgs),

    #[command(about = "Verify the configured credential against the API")]
    Validate(validate::ValidateArgs),

    #[command(about = "Print the connector self-description as JSON")]
    Metadata(metadata::MetadataArgs),

    #[command(subcommand, about = "Grant a membership or project assignment")]
    Grant(grant::GrantCommand),

    #[command(subcommand, about = "Revoke a membership or project assignment")]
    Revoke(revoke::RevokeCommand),

    #[command(subcommand, about = "Create or delete organization accounts")]
    Account(account::AccountCommand)
}

impl ConfigArgs {
    /// Resolve the effective configuration: defaults, then file, then
    /// environment, then flags.
    pub fn load(&self) -> Result<config::Config> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)
                .with_context(|| format!("loading config file {}", path.display()))?,
            None => config::Config::default()
        };

        config::apply_env_overrides(&mut cfg)
            .map_err(|e| anyhow::anyhow!("reading environment: {e}"))?;

        if let Some(token) = &self.api_token {
            cfg.connection.api_token = token.clone();
        }
        if let Some(url) = &self.base_url {
            cfg.connection.base_url = url.clone();
        }

        Ok(cfg.validated()?)
    }
}

/// Build the shared API client from a resolved configuration.
pub fn build_client(cfg: &config::Config) -> Result<Arc<FaultlineClient>> {
    Ok(Arc::new(FaultlineClient::with_timeout(
        &cfg.connection.base_url,
        &cfg.connection.api_token,
        std::time::Duration::from_secs(cfg.connection.timeout_seconds)
    )?))
}

pub fn build_connector(cfg: &config::Config) -> Result<Connector> {
    Ok(Connector::from_client(build_client(cfg)?))
}
