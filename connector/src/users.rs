//! User syncer and account lifecycle.
//!
//! Users are leaf principals: they are listed per organization, but carry
//! no entitlements and no grants of their own.

use async_trait::async_trait;
use client::models::{AddOrganizationMemberBody, OrganizationMember};
use client::{FaultlineClient, find_user_org_id};
use errors::{ConnectorError, ConnectorResult};
use fl_core::traits::AccountProfile;
use fl_core::{
    AccountManager, Entitlement, GrantPage, Profile, ProfileKey, Resource, ResourceKey,
    ResourcePage, ResourceSyncer, ResourceType,
};
use std::sync::Arc;
use tracing::info;

pub struct UserSyncer {
    client: Arc<FaultlineClient>
}

impl UserSyncer {
    pub fn new(client: Arc<FaultlineClient>) -> Self {
        Self { client }
    }
}

pub(crate) fn user_resource(
    member: &OrganizationMember,
    org_id: &str
) -> ConnectorResult<Resource> {
    if member.id.is_empty() || member.name.is_empty() {
        return Err(ConnectorError::mapping(
            "user",
            format!("missing id or name (id={:?}, name={:?})", member.id, member.name)
        ));
    }

    let mut profile = Profile::new()
        .set(ProfileKey::OrgId, org_id)
        .set(ProfileKey::Email, member.email.clone())
        .set(ProfileKey::Expired, member.expired);
    if let Some(invite_status) = &member.invite_status {
        profile = profile.set(ProfileKey::InviteStatus, invite_status.clone());
    }
    if let Some(created) = member.date_created {
        profile = profile.set(ProfileKey::CreatedAt, created.to_rfc3339());
    }

    Ok(Resource {
        id: member.id.clone(),
        resource_type: ResourceType::User,
        display_name: member.name.clone(),
        parent_id: Some(org_id.to_string()),
        profile
    })
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::User
    }

    async fn list(
        &self,
        parent: Option<&ResourceKey>,
        cursor: &str
    ) -> ConnectorResult<ResourcePage> {
        // Probing before an organization is known is a benign no-op.
        let Some(parent) = parent else {
            return Ok(ResourcePage::empty());
        };

        let response = self
            .client
            .list_organization_members(&parent.id, cursor)
            .await?;

        let resources = response
            .items
            .iter()
            .map(|member| user_resource(member, &parent.id))
            .collect::<ConnectorResult<Vec<_>>>()?;

        Ok(ResourcePage {
            resources,
            next_cursor: response.page.continuation(),
            rate_limit: response.rate_limit
        })
    }

    async fn entitlements(&self, _resource: &Resource) -> ConnectorResult<Vec<Entitlement>> {
        Ok(Vec::new())
    }

    async fn grants(&self, _resource: &Resource, _cursor: &str) -> ConnectorResult<GrantPage> {
        Ok(GrantPage::empty())
    }
}

fn profile_str<'a>(
    profile: &'a AccountProfile,
    field: &'static str
) -> ConnectorResult<&'a str> {
    profile
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(ConnectorError::MissingProfileField { field })
}

#[async_trait]
impl AccountManager for UserSyncer {
    /// Invite a new member into an organization. The profile is the flat
    /// key/value payload described by the account-creation schema: `email`
    /// and `orgID` required, `orgRole` optional.
    async fn create_account(&self, profile: &AccountProfile) -> ConnectorResult<()> {
        let email = profile_str(profile, "email")?;
        let org_id = profile_str(profile, "orgID")?;
        let org_role = profile
            .get("orgRole")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        self.client
            .add_organization_member(
                org_id,
                &AddOrganizationMemberBody {
                    email: email.to_string(),
                    org_role
                }
            )
            .await?;

        info!(org_id, email, "invited member to organization");
        Ok(())
    }

    /// Remove a member from whichever organization they belong to. The
    /// owning organization is not part of the request, so it is recovered
    /// by scanning all organizations.
    async fn delete_account(&self, user_id: &str) -> ConnectorResult<()> {
        let org_id = find_user_org_id(&self.client, user_id).await?;
        self.client
            .remove_organization_member(&org_id, user_id)
            .await?;

        info!(org_id = %org_id, user_id, "removed member from organization");
        Ok(())
    }
}
