//! Organization syncer: the root of the hierarchy walk.

use async_trait::async_trait;
use client::FaultlineClient;
use client::models::Organization;
use errors::{ConnectorError, ConnectorResult};
use fl_core::{
    Entitlement, Grant, GrantPage, MEMBERSHIP, Profile, ProfileKey, Resource, ResourceKey,
    ResourcePage, ResourceSyncer, ResourceType,
};
use std::sync::Arc;

pub struct OrganizationSyncer {
    client: Arc<FaultlineClient>
}

impl OrganizationSyncer {
    pub fn new(client: Arc<FaultlineClient>) -> Self {
        Self { client }
    }
}

pub(crate) fn organization_resource(org: &Organization) -> ConnectorResult<Resource> {
    if org.id.is_empty() || org.name.is_empty() {
        return Err(ConnectorError::mapping(
            "organization",
            format!("missing id or name (id={:?}, name={:?})", org.id, org.name)
        ));
    }

    let mut profile = Profile::new();
    if let Some(status) = &org.status {
        profile = profile.set(ProfileKey::Status, status.name.clone());
    }

    Ok(Resource {
        id: org.id.clone(),
        resource_type: ResourceType::Organization,
        display_name: org.name.clone(),
        parent_id: None,
        profile
    })
}

#[async_trait]
impl ResourceSyncer for OrganizationSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Organization
    }

    /// Root collection: requested with no parent scope; a supplied parent
    /// is ignored.
    async fn list(
        &self,
        _parent: Option<&ResourceKey>,
        cursor: &str
    ) -> ConnectorResult<ResourcePage> {
        let response = self.client.list_organizations(cursor).await?;

        let resources = response
            .items
            .iter()
            .map(organization_resource)
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
                format!("Member of {} organization", resource.display_name)
            )
            .grantable_to(&[ResourceType::User]),
        ])
    }

    async fn grants(&self, resource: &Resource, cursor: &str) -> ConnectorResult<GrantPage> {
        let response = self
            .client
            .list_organization_members(&resource.id, cursor)
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
