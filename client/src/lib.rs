//! # Faultline API Client
//!
//! Typed wrapper over the Faultline REST surface: bearer-token transport,
//! continuation-cursor pagination, pass-through rate-limit metadata and one
//! endpoint module per remote collection (organizations, teams, projects).
//!
//! The client does no retrying and no throttling; transient failures
//! surface as `ConnectorError::Transport` / `ConnectorError::Status` with
//! the failing operation named, and an outer layer decides what to do.

pub mod client;
pub mod helpers;
pub mod models;
pub mod organizations;
pub mod pagination;
pub mod projects;
pub mod ratelimit;
pub mod teams;
pub mod urls;

pub use client::{FaultlineClient, ListResponse};
pub use helpers::find_user_org_id;
pub use pagination::PageInfo;
pub use urls::DEFAULT_BASE_URL;
