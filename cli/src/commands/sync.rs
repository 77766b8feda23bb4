//! Sync command: full hierarchy walk, optionally dumping the snapshot.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use connector::SyncEngine;
use std::path::PathBuf;

use crate::commands::build_connector;
use crate::output;

#[derive(Args)]
pub struct SyncArgs {
    /// Print the full snapshot (resources, entitlements, grants) as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the JSON snapshot to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>
}

pub async fn run(args: SyncArgs, cfg: &config::Config) -> Result<()> {
    let connector = build_connector(cfg)?;
    let snapshot = SyncEngine::new(connector).sync_all().await?;

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        output::success(&format!("snapshot written to {}", path.display()));
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let report = &snapshot.report;
    output::header("Faultline Sync");
    println!();
    println!("  {} {}", "Organizations:".dimmed(), report.organizations);
    println!("  {} {}", "Users:".dimmed(), report.users);
    println!("  {} {}", "Teams:".dimmed(), report.teams);
    println!("  {} {}", "Projects:".dimmed(), report.projects);
    println!("  {} {}", "Entitlements:".dimmed(), report.entitlements);
    println!("  {} {}", "Grants:".dimmed(), report.grants);
    println!();
    output::success(&format!("{} resources synced", report.total_resources()));
    output::hint("use --json to dump the full snapshot");

    Ok(())
}
