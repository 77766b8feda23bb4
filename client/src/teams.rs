//! Team endpoints: listing, membership, membership provisioning.
//!
//! The remote API addresses teams by organization-scoped native id; the
//! composite `<orgId>/<teamId>` key exists only on the governance side.

use crate::client::{FaultlineClient, ListResponse};
use crate::models::{Team, TeamMember};
use errors::ConnectorResult;

impl FaultlineClient {
    pub async fn list_teams(
        &self,
        org: &str,
        cursor: &str
    ) -> ConnectorResult<ListResponse<Team>> {
        let url = self.paths().organization_teams(org);
        self.get_list("list-teams", url, cursor).await
    }

    pub async fn list_team_members(
        &self,
        org: &str,
        team: &str,
        cursor: &str
    ) -> ConnectorResult<ListResponse<TeamMember>> {
        let url = self.paths().team_members(org, team);
        self.get_list("list-team-members", url, cursor).await
    }

    pub async fn add_member_to_team(
        &self,
        org: &str,
        member: &str,
        team: &str
    ) -> ConnectorResult<()> {
        let url = self.paths().member_team(org, member, team);
        self.post_empty("add-member-to-team", url).await
    }

    pub async fn remove_member_from_team(
        &self,
        org: &str,
        member: &str,
        team: &str
    ) -> ConnectorResult<()> {
        let url = self.paths().member_team(org, member, team);
        self.delete("remove-member-from-team", url).await
    }
}
