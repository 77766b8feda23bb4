//! Metadata command: print the connector self-description, including the
//! account-creation field schema.

use anyhow::Result;
use clap::Args;
use connector::Connector;

#[derive(Args)]
pub struct MetadataArgs {}

pub fn run(_args: MetadataArgs) -> Result<()> {
    let metadata = Connector::metadata();
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
