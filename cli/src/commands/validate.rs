//! Validate command: exercise the configured credential.

use anyhow::Result;
use clap::Args;

use crate::commands::build_connector;
use crate::output;

#[derive(Args)]
pub struct ValidateArgs {}

pub async fn run(_args: ValidateArgs, cfg: &config::Config) -> Result<()> {
    let connector = build_connector(cfg)?;

    connector.validate().await?;
    output::success("credential accepted by the organizations listing");
    Ok(())
}
