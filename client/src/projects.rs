//! Project endpoints: listing, the detailed view used for assignment
//! checks, and team-to-project provisioning.

use crate::client::{FaultlineClient, ListResponse};
use crate::models::{DetailedProject, Project, ProjectMember};
use errors::ConnectorResult;

impl FaultlineClient {
    pub async fn list_projects(
        &self,
        org: &str,
        cursor: &str
    ) -> ConnectorResult<ListResponse<Project>> {
        let url = self.paths().organization_projects(org);
        self.get_list("list-projects", url, cursor).await
    }

    /// Active organization members belonging to any team assigned to the
    /// project.
    pub async fn list_project_members(
        &self,
        org: &str,
        project: &str,
        cursor: &str
    ) -> ConnectorResult<ListResponse<ProjectMember>> {
        let url = self.paths().project_members(org, project);
        self.get_list("list-project-members", url, cursor).await
    }

    /// Detailed project, including the `teams` assignment list.
    pub async fn get_project(
        &self,
        org: &str,
        project: &str
    ) -> ConnectorResult<DetailedProject> {
        let url = self.paths().project(org, project);
        self.get_one("get-project", url).await
    }

    pub async fn add_team_to_project(
        &self,
        org: &str,
        project: &str,
        team: &str
    ) -> ConnectorResult<()> {
        let url = self.paths().project_team(org, project, team);
        self.post_empty("add-team-to-project", url).await
    }

    pub async fn remove_team_from_project(
        &self,
        org: &str,
        project: &str,
        team: &str
    ) -> ConnectorResult<()> {
        let url = self.paths().project_team(org, project, team);
        self.delete("remove-team-from-project", url).await
    }
}
