//! # Connector Core
//!
//! Shared types and traits for the Faultline governance connector.
//!
//! This crate provides:
//! - The normalized governance model (resources, entitlements, grants)
//! - Composite identifier handling for org-scoped entities
//! - Syncer/provisioner traits implemented per resource type
//! - Pass-through rate-limit metadata attached to synced pages

pub mod traits;
pub mod types;

pub use traits::{AccountManager, GrantPage, Provisioner, ResourcePage, ResourceSyncer};
pub use types::{
    ASSIGNMENT, AccountCreationSchema, COMPOSITE_SEPARATOR, Entitlement, Grant, MEMBERSHIP,
    Profile, ProfileKey, ProvisionOutcome, RateLimit, Resource, ResourceKey, ResourceType,
    SchemaField, composite_id, split_composite_id,
};
