//! Wire models for Faultline responses.
//!
//! Trimmed to the fields the connector actually consumes; the remote
//! payloads carry far more.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<OrganizationStatus>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationStatus {
    pub id: String,
    pub name: String
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMember {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub org_role: Option<String>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub invite_status: Option<String>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>
}

/// Active members of any team assigned to a project share this shape.
pub type ProjectMember = OrganizationMember;

/// Single-member detail endpoint; `teams` lists the names of the teams the
/// member belongs to and is what the team grant/revoke existence check
/// reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMember {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub org_role: Option<String>,
    #[serde(default)]
    pub teams: Vec<String>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub member_count: Option<u64>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub team_role: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub status: Option<String>
}

/// Detailed project endpoint; `teams` is the assignment list read by the
/// project grant/revoke existence check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedProject {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub teams: Vec<ProjectTeam>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectTeam {
    pub id: String,
    pub name: String,
    pub slug: String
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrganizationMemberBody {
    pub email: String,
    /// One of the organization-defined role vocabulary ("owner",
    /// "manager", "member", "billing").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_role: Option<String>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_deserializes_camel_case() {
        let json = r#"{
            "id": "7",
            "email": "dev@acme.io",
            "name": "Dev",
            "orgRole": "member",
            "pending": false,
            "expired": true,
            "inviteStatus": "approved",
            "dateCreated": "2024-03-01T12:00:00Z"
        }"#;
        let member: OrganizationMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.org_role.as_deref(), Some("member"));
        assert!(member.expired);
        assert_eq!(member.invite_status.as_deref(), Some("approved"));
    }

    #[test]
    fn test_add_member_body_omits_absent_role() {
        let body = AddOrganizationMemberBody {
            email: "new@acme.io".to_string(),
            org_role: None
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"email":"new@acme.io"}"#);
    }

    #[test]
    fn test_detailed_project_team_list() {
        let json = r#"{
            "id": "900",
            "slug": "web",
            "name": "Web",
            "status": "active",
            "teams": [{"id": "4711", "name": "Engineering", "slug": "eng"}]
        }"#;
        let project: DetailedProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.teams.len(), 1);
        assert_eq!(project.teams[0].id, "4711");
    }
}
