//! Account lifecycle commands: invite and remove organization members.

use anyhow::Result;
use clap::{Args, Subcommand};
use fl_core::AccountManager;
use serde_json::json;

use crate::commands::build_connector;
use crate::output;

#[derive(Subcommand)]
pub enum AccountCommand {
    #[command(about = "Invite a new member into an organization")]
    Create(CreateArgs),

    #[command(about = "Remove a member from their organization")]
    Delete(DeleteArgs)
}

#[derive(Args)]
pub struct CreateArgs {
    /// Email address to invite
    #[arg(long)]
    pub email: String,

    /// Organization id or slug
    #[arg(long)]
    pub org: String,

    /// Organization role (owner/manager/member/billing)
    #[arg(long)]
    pub role: Option<String>
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Member id to remove
    pub user_id: String
}

pub async fn run(cmd: AccountCommand, cfg: &config::Config) -> Result<()> {
    let connector = build_connector(cfg)?;
    let manager = connector.account_manager();

    match cmd {
        AccountCommand::Create(args) => {
            let mut profile = serde_json::Map::new();
            profile.insert("email".to_string(), json!(args.email));
            profile.insert("orgID".to_string(), json!(args.org));
            if let Some(role) = &args.role {
                profile.insert("orgRole".to_string(), json!(role));
            }

            manager.create_account(&profile).await?;
            output::success(&format!("invited {} to {}", args.email, args.org));
        }
        AccountCommand::Delete(args) => {
            manager.delete_account(&args.user_id).await?;
            output::success(&format!("removed member {}", args.user_id));
        }
    }

    Ok(())
}
