//! Grant command: idempotent write-side provisioning.

use anyhow::Result;
use clap::{Args, Subcommand};
use connector::Connector;
use fl_core::{ASSIGNMENT, Entitlement, MEMBERSHIP, Provisioner, ResourceKey, ResourceType};

use crate::commands::{build_client, resolve};
use crate::output;

#[derive(Subcommand)]
pub enum GrantCommand {
    #[command(about = "Add a member to a team")]
    Team(TeamArgs),

    #[command(about = "Assign a team to a project")]
    Project(ProjectArgs)
}

#[derive(Args)]
pub struct TeamArgs {
    /// Organization id or slug
    #[arg(long)]
    pub org: String,

    /// Team id or slug
    #[arg(long)]
    pub team: String,

    /// Member id to add
    #[arg(long)]
    pub member: String
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Organization id or slug
    #[arg(long)]
    pub org: String,

    /// Project id or slug
    #[arg(long)]
    pub project: String,

    /// Team id or slug to assign
    #[arg(long)]
    pub team: String
}

pub async fn run(cmd: GrantCommand, cfg: &config::Config) -> Result<()> {
    let api = build_client(cfg)?;
    let connector = Connector::from_client(api.clone());

    match cmd {
        GrantCommand::Team(args) => {
            let team = resolve::team(&api, &args.org, &args.team).await?;
            let entitlement = Entitlement::assignment(
                &team,
                MEMBERSHIP,
                format!("Member of {} team", team.display_name)
            )
            .grantable_to(&[ResourceType::User]);

            let principal = ResourceKey::new(ResourceType::User, args.member.clone());
            let outcome = connector
                .team_provisioner()
                .grant(&principal, &entitlement)
                .await?;
            output::outcome(
                &format!("member {} in team {}", args.member, team.display_name),
                outcome
            );
        }
        GrantCommand::Project(args) => {
            let project = resolve::project(&api, &args.org, &args.project).await?;
            let team = resolve::team(&api, &args.org, &args.team).await?;
            let entitlement = Entitlement::assignment(
                &project,
                ASSIGNMENT,
                format!("Assignment of {} project", project.display_name)
            )
            .grantable_to(&[ResourceType::Team]);

            let principal = ResourceKey::new(ResourceType::Team, team.id.clone());
            let outcome = connector
                .project_provisioner()
                .grant(&principal, &entitlement)
                .await?;
            output::outcome(
                &format!(
                    "team {} on project {}",
                    team.display_name, project.display_name
                ),
                outcome
            );
        }
    }

    Ok(())
}
