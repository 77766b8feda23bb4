//! Organization endpoints: listing, membership, member provisioning.

use crate::client::{FaultlineClient, ListResponse};
use crate::models::{AddOrganizationMemberBody, DetailedMember, Organization, OrganizationMember};
use errors::ConnectorResult;

impl FaultlineClient {
    /// Top-level collection; the only listing that takes no parent scope.
    pub async fn list_organizations(
        &self,
        cursor: &str
    ) -> ConnectorResult<ListResponse<Organization>> {
        let url = self.paths().organizations();
        self.get_list("list-organizations", url, cursor).await
    }

    pub async fn list_organization_members(
        &self,
        org: &str,
        cursor: &str
    ) -> ConnectorResult<ListResponse<OrganizationMember>> {
        let url = self.paths().organization_members(org);
        self.get_list("list-organization-members", url, cursor).await
    }

    /// Single detailed member, including the `teams` name list used by the
    /// team grant existence check.
    pub async fn get_organization_member(
        &self,
        org: &str,
        member: &str
    ) -> ConnectorResult<DetailedMember> {
        let url = self.paths().organization_member(org, member);
        self.get_one("get-organization-member", url).await
    }

    pub async fn add_organization_member(
        &self,
        org: &str,
        body: &AddOrganizationMemberBody
    ) -> ConnectorResult<()> {
        let url = self.paths().organization_members(org);
        self.post_json("add-organization-member", url, body).await
    }

    pub async fn remove_organization_member(
        &self,
        org: &str,
        member: &str
    ) -> ConnectorResult<()> {
        let url = self.paths().organization_member(org, member);
        self.delete("remove-organization-member", url).await
    }
}
