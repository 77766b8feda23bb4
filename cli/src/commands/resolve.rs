//! Identifier resolution for the provisioning commands.
//!
//! Grant/revoke requests arrive with bare remote ids or slugs; the
//! reconcilers want fully-formed resources (composite team ids, display
//! names for the existence checks), so the ids are resolved against the
//! live API first.

use anyhow::Result;
use client::FaultlineClient;
use errors::ConnectorError;
use fl_core::{Profile, ProfileKey, Resource, ResourceType, composite_id};

/// Resolve a team by id or slug within an organization, walking the
/// paginated team listing.
pub async fn team(api: &FaultlineClient, org: &str, team: &str) -> Result<Resource> {
    let mut cursor = String::new();

    loop {
        let page = api.list_teams(org, &cursor).await?;

        if let Some(found) = page.items.iter().find(|t| t.id == team || t.slug == team) {
            return Ok(Resource {
                id: composite_id(org, &found.id),
                resource_type: ResourceType::Team,
                display_name: found.name.clone(),
                parent_id: Some(org.to_string()),
                profile: Profile::new().set(ProfileKey::OrgId, org)
            });
        }

        if !page.page.has_next {
            return Err(ConnectorError::NotFound {
                what: "team",
                id: format!("{org}/{team}")
            }
            .into());
        }
        cursor = page.page.continuation();
    }
}

/// Resolve a project by id or slug within an organization.
pub async fn project(api: &FaultlineClient, org: &str, project: &str) -> Result<Resource> {
    let detailed = api.get_project(org, project).await?;

    Ok(Resource {
        id: detailed.id.clone(),
        resource_type: ResourceType::Project,
        display_name: detailed.name.clone(),
        parent_id: Some(org.to_string()),
        profile: Profile::new().set(ProfileKey::OrgId, org)
    })
}
