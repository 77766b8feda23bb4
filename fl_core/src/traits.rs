//! Syncer and provisioner seams implemented once per resource type.

use crate::types::{
    Entitlement, Grant, ProvisionOutcome, RateLimit, Resource, ResourceKey, ResourceType,
};
use async_trait::async_trait;
use errors::ConnectorResult;
use serde::{Deserialize, Serialize};

/// One page of mapped resources.
///
/// `next_cursor` is empty when the listing is exhausted; the caller holds
/// the cursor between calls, which keeps the walk restartable and single
/// page at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcePage {
    pub resources: Vec<Resource>,
    pub next_cursor: String,
    pub rate_limit: Option<RateLimit>,
}

impl ResourcePage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_next(&self) -> bool {
        !self.next_cursor.is_empty()
    }
}

/// One page of derived grants for a container resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantPage {
    pub grants: Vec<Grant>,
    pub next_cursor: String,
    pub rate_limit: Option<RateLimit>,
}

impl GrantPage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_next(&self) -> bool {
        !self.next_cursor.is_empty()
    }
}

/// Flat key/value payload for account provisioning requests.
pub type AccountProfile = serde_json::Map<String, serde_json::Value>;

/// Read-side sync surface for one remote collection type.
///
/// `list` fetches exactly one page per call; an empty `cursor` means the
/// first page. Child collections called without a parent return an empty
/// page rather than erroring, so the traversal order of the consuming sync
/// engine may probe before a parent is known.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    fn resource_type(&self) -> ResourceType;

    async fn list(
        &self,
        parent: Option<&ResourceKey>,
        cursor: &str,
    ) -> ConnectorResult<ResourcePage>;

    async fn entitlements(&self, resource: &Resource) -> ConnectorResult<Vec<Entitlement>>;

    async fn grants(&self, resource: &Resource, cursor: &str) -> ConnectorResult<GrantPage>;
}

/// Write-side reconciliation for membership-type relations.
///
/// Both operations are read-before-write: the current remote state is
/// fetched first and the mutation is skipped when the relation already
/// holds (or is already absent). The check-then-act pair is not atomic;
/// the caller is expected to run at most one in-flight reconciliation per
/// (container, principal) pair.
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn grant(
        &self,
        principal: &ResourceKey,
        entitlement: &Entitlement,
    ) -> ConnectorResult<ProvisionOutcome>;

    async fn revoke(&self, grant: &Grant) -> ConnectorResult<ProvisionOutcome>;
}

/// Principal lifecycle operations (create/delete remote accounts).
#[async_trait]
pub trait AccountManager: Send + Sync {
    async fn create_account(&self, profile: &AccountProfile) -> ConnectorResult<()>;

    async fn delete_account(&self, user_id: &str) -> ConnectorResult<()>;
}
