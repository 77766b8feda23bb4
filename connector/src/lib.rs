//! # Faultline Connector
//!
//! Per-resource-type syncers that mirror the Faultline hierarchy
//! (organizations → teams / projects → members) into the normalized
//! resource/entitlement/grant model, plus the idempotent write-side
//! reconciliation the governance platform drives (grant, revoke, account
//! create/delete).
//!
//! One syncer per resource type, one file per syncer, mirroring the remote
//! API's own split.

pub mod connector;
pub mod organizations;
pub mod projects;
pub mod sync;
pub mod teams;
pub mod users;

pub use connector::Connector;
pub use organizations::OrganizationSyncer;
pub use projects::ProjectSyncer;
pub use sync::{SyncEngine, SyncReport, SyncSnapshot};
pub use teams::TeamSyncer;
pub use users::UserSyncer;
