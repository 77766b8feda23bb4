//! Team syncer and membership reconciliation.
//!
//! Team ids are organization-scoped on the remote side, so team resources
//! are keyed by the composite `<orgId>/<teamId>` and decomposed again
//! before any remote call.

use async_trait::async_trait;
use client::FaultlineClient;
use client::models::Team;
use errors::{ConnectorError, ConnectorResult};
use fl_core::{
    Entitlement, Grant, GrantPage, MEMBERSHIP, Profile, ProfileKey, Provisioner,
    ProvisionOutcome, Resource, ResourceKey, ResourcePage, ResourceSyncer, ResourceType,
    composite_id, split_composite_id,
};
use std::sync::Arc;
use tracing::info;

pub struct TeamSyncer {
    client: Arc<FaultlineClient>
}

impl TeamSyncer {
    pub fn new(client: Arc<FaultlineClient>) -> Self {
        Self { client }
    }
}

pub(crate) fn team_resource(team: &Team, org_id: &str) -> ConnectorResult<Resource> {
    if team.id.is_empty() || team.name.is_empty() {
        return Err(ConnectorError::mapping(
            "team",
            format!("missing id or name (id={:?}, name={:?})", team.id, team.name)
        ));
    }

    Ok(Resource {
        id: composite_id(org_id, &team.id),
        resource_type: ResourceType::Team,
        display_name: team.name.clone(),
        parent_id: Some(org_id.to_string()),
        profile: Profile::new().set(ProfileKey::OrgId, org_id)
    })
}

#[async_trait]
impl ResourceSyncer for TeamSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Team
    }

    async fn list(
        &self,
        parent: Option<&ResourceKey>,
        cursor: &str
    ) -> ConnectorResult<ResourcePage> {
        let Some(parent) = parent else {
            return Ok(ResourcePage::empty());
        };

        let response = self.client.list_teams(&parent.id, cursor).await?;

        let resources = response
            .items
            .iter()
            .map(|team| team_resource(team, &parent.id))
            .collect::<ConnectorResult<Vec<_>>>()?;

        Ok(ResourcePage {
            resources,
            next_cursor: response.page.continuation(),
            rate_limit: response.rate_limit
        })
    }

    async fn entitlements(&self, resource: &Resource) -> ConnectorResult<Vec<Entitlement>> {
        Ok(vec![
            Entitlement::assignment(
                resource,
                MEMBERSHIP,
                format!("Member of {} team", resource.display_name)
            )
            .grantable_to(&[ResourceType::User]),
        ])
    }

    async fn grants(&self, resource: &Resource, cursor: &str) -> ConnectorResult<GrantPage> {
        let (org_id, team_id) = split_composite_id(&resource.id)?;
        let response = self
            .client
            .list_team_members(org_id, team_id, cursor)
            .await?;

        let grants = response
            .items
            .iter()
            .map(|member| {
                Grant::new(
                    resource,
                    MEMBERSHIP,
                    ResourceKey::new(ResourceType::User, member.id.clone())
                )
            })
            .collect();

        Ok(GrantPage {
            grants,
            next_cursor: response.page.continuation(),
            rate_limit: response.rate_limit
        })
    }
}

#[async_trait]
impl Provisioner for TeamSyncer {
    /// Ensure `principal` is a member of the entitlement's team. The
    /// member-detail `teams` list (team names) is the existence check;
    /// when the name is already present no write is issued.
    async fn grant(
        &self,
        principal: &ResourceKey,
        entitlement: &Entitlement
    ) -> ConnectorResult<ProvisionOutcome> {
        if principal.resource_type != ResourceType::User {
            return Err(ConnectorError::UnexpectedPrincipalType {
                expected: ResourceType::User.to_string(),
                actual: principal.resource_type.to_string()
            });
        }

        let (org_id, team_id) = split_composite_id(&entitlement.resource.id)?;
        let team_name = &entitlement.resource.display_name;

        let member = self
            .client
            .get_organization_member(org_id, &principal.id)
            .await?;

        if member.teams.iter().any(|name| name == team_name) {
            info!(org_id, team_id, member_id = %principal.id, "member already in team");
            return Ok(ProvisionOutcome::AlreadyGranted);
        }

        self.client
            .add_member_to_team(org_id, &principal.id, team_id)
            .await?;

        info!(org_id, team_id, member_id = %principal.id, "added member to team");
        Ok(ProvisionOutcome::Granted)
    }

    /// Ensure the grant's principal is no longer a member of the team.
    async fn revoke(&self, grant: &Grant) -> ConnectorResult<ProvisionOutcome> {
        if grant.principal.resource_type != ResourceType::User {
            return Err(ConnectorError::UnexpectedPrincipalType {
                expected: ResourceType::User.to_string(),
                actual: grant.principal.resource_type.to_string()
            });
        }

        let (org_id, team_id) = split_composite_id(&grant.resource.id)?;
        let team_name = &grant.resource.display_name;

        let member = self
            .client
            .get_organization_member(org_id, &grant.principal.id)
            .await?;

        if !member.teams.iter().any(|name| name == team_name) {
            info!(org_id, team_id, member_id = %grant.principal.id, "member already out of team");
            return Ok(ProvisionOutcome::AlreadyRevoked);
        }

        self.client
            .remove_member_from_team(org_id, &grant.principal.id, team_id)
            .await?;

        info!(org_id, team_id, member_id = %grant.principal.id, "removed member from team");
        Ok(ProvisionOutcome::Revoked)
    }
}
