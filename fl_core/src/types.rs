//! Normalized governance model types.
//!
//! Remote Faultline objects (organizations, teams, projects, members) are
//! mapped into `Resource` / `Entitlement` / `Grant` triples. All three are
//! recomputed fresh on every sync page; nothing here persists in-process.

use chrono::{DateTime, Utc};
use errors::{ConnectorError, ConnectorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Entitlement slug for organization and team membership.
pub const MEMBERSHIP: &str = "member";

/// Entitlement slug for team-to-project assignment.
pub const ASSIGNMENT: &str = "assigned";

/// Separator for composite `<orgId>/<childId>` identifiers.
pub const COMPOSITE_SEPARATOR: char = '/';

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceType {
    Organization,
    Team,
    Project,
    User,
}

impl ResourceType {
    /// Container types can hold members/assignments; users are leaf
    /// principals and never carry entitlements.
    pub fn is_container(self) -> bool {
        !matches!(self, Self::User)
    }
}

/// Typed reference to a resource: `<type>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub resource_type: ResourceType,
    pub id: String,
}

impl ResourceKey {
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource_type,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.id)
    }
}

/// Build the composite identifier for an org-scoped entity.
///
/// Team ids are only unique within their organization, so every Team
/// resource is keyed as `<orgId>/<teamId>`.
pub fn composite_id(org_id: &str, child_id: &str) -> String {
    format!("{org_id}{COMPOSITE_SEPARATOR}{child_id}")
}

/// Split a composite identifier back into `(orgId, childId)`.
///
/// Must yield exactly two non-empty segments; anything else is a malformed
/// id, not a fallback case.
pub fn split_composite_id(id: &str) -> ConnectorResult<(&str, &str)> {
    let mut parts = id.split(COMPOSITE_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(org), Some(child), None) if !org.is_empty() && !child.is_empty() => {
            Ok((org, child))
        }
        _ => Err(ConnectorError::InvalidCompositeId { id: id.to_string() }),
    }
}

/// Enumerated profile keys attached to resources.
///
/// The governance side expects a flexible key/value payload per resource;
/// the key space is closed here so a typo cannot silently produce a new
/// trait name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProfileKey {
    OrgId,
    Status,
    Email,
    Expired,
    InviteStatus,
    IsPublic,
    CreatedAt,
}

/// Key/value trait payload carried by every resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(BTreeMap<ProfileKey, serde_json::Value>);

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: ProfileKey, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn get(&self, key: ProfileKey) -> Option<&serde_json::Value> {
        self.0.get(&key)
    }

    pub fn get_str(&self, key: ProfileKey) -> Option<&str> {
        self.0.get(&key).and_then(|v| v.as_str())
    }

    /// The owning organization id, populated on every non-organization
    /// resource so downstream consumers can reconstruct the hierarchy
    /// without re-fetching.
    pub fn org_id(&self) -> Option<&str> {
        self.get_str(ProfileKey::OrgId)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Normalized representation of one remote entity.
///
/// Invariant: every non-organization resource carries a non-empty
/// `parent_id`. Team ids are composite (`<orgId>/<teamId>`); all other
/// types use the remote native id unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub resource_type: ResourceType,
    pub display_name: String,
    pub parent_id: Option<String>,
    pub profile: Profile,
}

impl Resource {
    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(self.resource_type, self.id.clone())
    }
}

/// A named, grantable capability scoped to a container resource.
///
/// Carries the full container resource, not just its key: the write-side
/// reconciler needs the container's display name for existence checks
/// against name-keyed remote listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub resource: Resource,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    pub grantable_to: Vec<ResourceType>,
}

impl Entitlement {
    pub fn assignment(resource: &Resource, slug: &str, display_name: String) -> Self {
        Self {
            resource: resource.clone(),
            slug: slug.to_string(),
            description: display_name.clone(),
            display_name,
            grantable_to: Vec::new(),
        }
    }

    pub fn grantable_to(mut self, types: &[ResourceType]) -> Self {
        self.grantable_to = types.to_vec();
        self
    }

    /// Stable entitlement identifier: `<type>:<resourceId>:<slug>`.
    pub fn id(&self) -> String {
        format!(
            "{}:{}:{}",
            self.resource.resource_type, self.resource.id, self.slug
        )
    }
}

/// An assertion that `principal` holds `entitlement_slug` on `resource`.
///
/// Grants are derived, never stored; the remote member listing is the
/// source of truth on every sync pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub resource: Resource,
    pub entitlement_slug: String,
    pub principal: ResourceKey,
    /// Entitlement ids this grant expands into, e.g. a project→team grant
    /// flattening through the team's membership.
    pub expandable: Vec<String>,
}

impl Grant {
    pub fn new(resource: &Resource, entitlement_slug: &str, principal: ResourceKey) -> Self {
        Self {
            resource: resource.clone(),
            entitlement_slug: entitlement_slug.to_string(),
            principal,
            expandable: Vec::new(),
        }
    }

    pub fn expands_to(mut self, entitlement_ids: Vec<String>) -> Self {
        self.expandable = entitlement_ids;
        self
    }
}

/// Outcome of an idempotent grant/revoke request.
///
/// `AlreadyGranted` and `AlreadyRevoked` are success values: repeating a
/// provisioning request is a safe no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProvisionOutcome {
    Granted,
    AlreadyGranted,
    Revoked,
    AlreadyRevoked,
}

impl ProvisionOutcome {
    /// Whether a remote write was actually issued.
    pub fn changed(self) -> bool {
        matches!(self, Self::Granted | Self::Revoked)
    }
}

/// Pass-through rate-limit metadata attached to a synced page.
///
/// No throttling decision is made here; the caller/transport owns that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
    pub limit: Option<i64>,
    pub remaining: Option<i64>,
    pub reset_at: Option<DateTime<Utc>>,
}

/// Flat field schema for the write-side "create principal" operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCreationSchema {
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub required: bool,
    pub placeholder: String,
    pub order: u32,
}

/// Connector self-description handed to the governance platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
    pub account_creation_schema: AccountCreationSchema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_id_round_trip() {
        let id = composite_id("acme", "4711");
        assert_eq!(id, "acme/4711");
        let (org, team) = split_composite_id(&id).unwrap();
        assert_eq!(org, "acme");
        assert_eq!(team, "4711");
    }

    #[test]
    fn test_split_composite_id_rejects_malformed() {
        assert!(split_composite_id("acme").is_err());
        assert!(split_composite_id("acme/eng/extra").is_err());
        assert!(split_composite_id("/eng").is_err());
        assert!(split_composite_id("acme/").is_err());
        assert!(split_composite_id("").is_err());
    }

    #[test]
    fn test_profile_org_id() {
        let profile = Profile::new()
            .set(ProfileKey::OrgId, "acme")
            .set(ProfileKey::Expired, false);
        assert_eq!(profile.org_id(), Some("acme"));
        assert_eq!(profile.get(ProfileKey::Expired), Some(&false.into()));
        assert!(profile.get(ProfileKey::Email).is_none());
    }

    #[test]
    fn test_profile_serializes_with_snake_case_keys() {
        let profile = Profile::new().set(ProfileKey::InviteStatus, "approved");
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["invite_status"], "approved");
    }

    #[test]
    fn test_entitlement_id_format() {
        let team = Resource {
            id: composite_id("acme", "4711"),
            resource_type: ResourceType::Team,
            display_name: "Engineering".to_string(),
            parent_id: Some("acme".to_string()),
            profile: Profile::new().set(ProfileKey::OrgId, "acme"),
        };
        let ent = Entitlement::assignment(&team, MEMBERSHIP, "Member of Engineering".to_string())
            .grantable_to(&[ResourceType::User]);
        assert_eq!(ent.id(), "team:acme/4711:member");
        assert_eq!(ent.grantable_to, vec![ResourceType::User]);
    }

    #[test]
    fn test_provision_outcome_changed() {
        assert!(ProvisionOutcome::Granted.changed());
        assert!(ProvisionOutcome::Revoked.changed());
        assert!(!ProvisionOutcome::AlreadyGranted.changed());
        assert!(!ProvisionOutcome::AlreadyRevoked.changed());
    }

    #[test]
    fn test_resource_type_display_matches_wire_ids() {
        assert_eq!(ResourceType::Organization.to_string(), "organization");
        assert_eq!(ResourceType::User.to_string(), "user");
        assert!(ResourceType::Project.is_container());
        assert!(!ResourceType::User.is_container());
    }
}
