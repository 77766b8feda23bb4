//! Revoke command: the mirror of `grant`.

use anyhow::Result;
use clap::Subcommand;
use connector::Connector;
use fl_core::{ASSIGNMENT, Grant, MEMBERSHIP, Provisioner, ResourceKey, ResourceType};

use crate::commands::grant::{ProjectArgs, TeamArgs};
use crate::commands::{build_client, resolve};
use crate::output;

#[derive(Subcommand)]
pub enum RevokeCommand {
    #[command(about = "Remove a member from a team")]
    Team(TeamArgs),

    #[command(about = "Unassign a team from a project")]
    Project(ProjectArgs)
}

pub async fn run(cmd: RevokeCommand, cfg: &config::Config) -> Result<()> {
    let api = build_client(cfg)?;
    let connector = Connector::from_client(api.clone());

    match cmd {
        RevokeCommand::Team(args) => {
            let team = resolve::team(&api, &args.org, &args.team).await?;
            let grant = Grant::new(
                &team,
                MEMBERSHIP,
                ResourceKey::new(ResourceType::User, args.member.clone())
            );

            let outcome = connector.team_provisioner().revoke(&grant).await?;
            output::outcome(
                &format!("member {} out of team {}", args.member, team.display_name),
                outcome
            );
        }
        RevokeCommand::Project(args) => {
            let project = resolve::project(&api, &args.org, &args.project).await?;
            let team = resolve::team(&api, &args.org, &args.team).await?;
            let grant = Grant::new(
                &project,
                ASSIGNMENT,
                ResourceKey::new(ResourceType::Team, team.id.clone())
            );

            let outcome = connector.project_provisioner().revoke(&grant).await?;
            output::outcome(
                &format!(
                    "team {} off project {}",
                    team.display_name, project.display_name
                ),
                outcome
            );
        }
    }

    Ok(())
}
