//! Project syncer and team-assignment reconciliation.
//!
//! Projects grant the `assigned` entitlement to teams; a project→team
//! grant expands into the team's `member` entitlement so the governance
//! side can flatten team membership into project access.

use async_trait::async_trait;
use client::FaultlineClient;
use client::models::Project;
use errors::{ConnectorError, ConnectorResult};
use fl_core::{
    ASSIGNMENT, Entitlement, Grant, GrantPage, MEMBERSHIP, Profile, ProfileKey, Provisioner,
    ProvisionOutcome, Resource, ResourceKey, ResourcePage, ResourceSyncer, ResourceType,
    composite_id, split_composite_id,
};
use std::sync::Arc;
use tracing::info;

pub struct ProjectSyncer {
    client: Arc<FaultlineClient>
}

impl ProjectSyncer {
    pub fn new(client: Arc<FaultlineClient>) -> Self {
        Self { client }
    }
}

pub(crate) fn project_resource(project: &Project, org_id: &str) -> ConnectorResult<Resource> {
    if project.id.is_empty() || project.name.is_empty() {
        return Err(ConnectorError::mapping(
            "project",
            format!(
                "missing id or name (id={:?}, name={:?})",
                project.id, project.name
            )
        ));
    }

    let mut profile = Profile::new()
        .set(ProfileKey::OrgId, org_id)
        .set(ProfileKey::IsPublic, project.is_public);
    if let Some(status) = &project.status {
        profile = profile.set(ProfileKey::Status, status.clone());
    }

    Ok(Resource {
        id: project.id.clone(),
        resource_type: ResourceType::Project,
        display_name: project.name.clone(),
        parent_id: Some(org_id.to_string()),
        profile
    })
}

// Project ids are native, not composite, so the owning org has to come
// from the resource itself.
fn project_org_id(resource: &Resource) -> ConnectorResult<&str> {
    resource
        .parent_id
        .as_deref()
        .or_else(|| resource.profile.org_id())
        .ok_or_else(|| {
            ConnectorError::mapping("project", format!("{}: missing parent organization", resource.id))
        })
}

#[async_trait]
impl ResourceSyncer for ProjectSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Project
    }

    async fn list(
        &self,
        parent: Option<&ResourceKey>,
        cursor: &str
    ) -> ConnectorResult<ResourcePage> {
        let Some(parent) = parent else {
            return Ok(ResourcePage::empty());
        };

        let response = self.client.list_projects(&parent.id, cursor).await?;

        let resources = response
            .items
            .iter()
            .map(|project| project_resource(project, &parent.id))
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
                ASSIGNMENT,
                format!("Assignment of {} project", resource.display_name)
            )
            .grantable_to(&[ResourceType::Team]),
        ])
    }

    /// Assignment grants come from the detailed project view, which is not
    /// paginated; the listing is a single page.
    async fn grants(&self, resource: &Resource, _cursor: &str) -> ConnectorResult<GrantPage> {
        let org_id = project_org_id(resource)?;
        let project = self.client.get_project(org_id, &resource.id).await?;

        let grants = project
            .teams
            .iter()
            .map(|team| {
                let team_key = composite_id(org_id, &team.id);
                let member_entitlement = format!("team:{}:{}", team_key, MEMBERSHIP);
                Grant::new(
                    resource,
                    ASSIGNMENT,
                    ResourceKey::new(ResourceType::Team, team_key)
                )
                .expands_to(vec![member_entitlement])
            })
            .collect();

        Ok(GrantPage {
            grants,
            next_cursor: String::new(),
            rate_limit: None
        })
    }
}

#[async_trait]
impl Provisioner for ProjectSyncer {
    /// Ensure the principal team is assigned to the entitlement's project.
    /// The detailed project's `teams` list is the existence check, keyed
    /// by the team's bare (organization-scoped) id.
    async fn grant(
        &self,
        principal: &ResourceKey,
        entitlement: &Entitlement
    ) -> ConnectorResult<ProvisionOutcome> {
        if principal.resource_type != ResourceType::Team {
            return Err(ConnectorError::UnexpectedPrincipalType {
                expected: ResourceType::Team.to_string(),
                actual: principal.resource_type.to_string()
            });
        }

        let (org_id, team_id) = split_composite_id(&principal.id)?;
        let project_id = &entitlement.resource.id;

        let project = self.client.get_project(org_id, project_id).await?;
        if project.teams.iter().any(|team| team.id == team_id) {
            info!(org_id, project_id, team_id, "team already assigned to project");
            return Ok(ProvisionOutcome::AlreadyGranted);
        }

        self.client
            .add_team_to_project(org_id, project_id, team_id)
            .await?;

        info!(org_id, project_id, team_id, "assigned team to project");
        Ok(ProvisionOutcome::Granted)
    }

    async fn revoke(&self, grant: &Grant) -> ConnectorResult<ProvisionOutcome> {
        if grant.principal.resource_type != ResourceType::Team {
            return Err(ConnectorError::UnexpectedPrincipalType {
                expected: ResourceType::Team.to_string(),
                actual: grant.principal.resource_type.to_string()
            });
        }

        let (org_id, team_id) = split_composite_id(&grant.principal.id)?;
        let project_id = &grant.resource.id;

        let project = self.client.get_project(org_id, project_id).await?;
        if !project.teams.iter().any(|team| team.id == team_id) {
            info!(org_id, project_id, team_id, "team already unassigned from project");
            return Ok(ProvisionOutcome::AlreadyRevoked);
        }

        self.client
            .remove_team_from_project(org_id, project_id, team_id)
            .await?;

        info!(org_id, project_id, team_id, "unassigned team from project");
        Ok(ProvisionOutcome::Revoked)
    }
}
