//! Path construction for every remote operation.
//!
//! All endpoint shapes live in this one table-like module; nothing else in
//! the workspace formats a Faultline path. `Paths` is built once per client
//! and is read-only afterwards.

pub const DEFAULT_BASE_URL: &str = "https://faultline.io/api/0/";

#[derive(Debug, Clone)]
pub struct Paths {
    base: String
}

impl Paths {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string()
        }
    }

    pub fn organizations(&self) -> String {
        format!("{}/organizations/", self.base)
    }

    pub fn organization_members(&self, org: &str) -> String {
        format!("{}/organizations/{}/members/", self.base, org)
    }

    pub fn organization_member(&self, org: &str, member: &str) -> String {
        format!("{}/organizations/{}/members/{}/", self.base, org, member)
    }

    pub fn organization_teams(&self, org: &str) -> String {
        format!("{}/organizations/{}/teams/", self.base, org)
    }

    pub fn organization_projects(&self, org: &str) -> String {
        format!("{}/organizations/{}/projects/", self.base, org)
    }

    pub fn team_members(&self, org: &str, team: &str) -> String {
        format!("{}/teams/{}/{}/members/", self.base, org, team)
    }

    /// Team membership provisioning target.
    pub fn member_team(&self, org: &str, member: &str, team: &str) -> String {
        format!(
            "{}/organizations/{}/members/{}/teams/{}/",
            self.base, org, member, team
        )
    }

    pub fn project(&self, org: &str, project: &str) -> String {
        format!("{}/projects/{}/{}/", self.base, org, project)
    }

    pub fn project_members(&self, org: &str, project: &str) -> String {
        format!("{}/projects/{}/{}/members/", self.base, org, project)
    }

    /// Team-to-project assignment target; the team id travels in the path,
    /// not the body.
    pub fn project_team(&self, org: &str, project: &str, team: &str) -> String {
        format!("{}/projects/{}/{}/teams/{}/", self.base, org, project, team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_normalize_trailing_slash() {
        let a = Paths::new("https://faultline.io/api/0/");
        let b = Paths::new("https://faultline.io/api/0");
        assert_eq!(a.organizations(), b.organizations());
        assert_eq!(a.organizations(), "https://faultline.io/api/0/organizations/");
    }

    #[test]
    fn test_nested_paths() {
        let paths = Paths::new("http://localhost:9000");
        assert_eq!(
            paths.team_members("acme", "4711"),
            "http://localhost:9000/teams/acme/4711/members/"
        );
        assert_eq!(
            paths.member_team("acme", "7", "4711"),
            "http://localhost:9000/organizations/acme/members/7/teams/4711/"
        );
        assert_eq!(
            paths.project_team("acme", "web", "4711"),
            "http://localhost:9000/projects/acme/web/teams/4711/"
        );
    }
}
