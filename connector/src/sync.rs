//! Full-hierarchy sync engine.
//!
//! Drives the page-at-a-time syncers over the whole tree: organizations
//! first, then each organization's users, teams and projects, emitting
//! entitlements and grants for every container resource along the way.
//!
//! Strictly sequential and strict about failure: a transport, status or
//! mapping error anywhere aborts the sync with that error; no partial
//! page is ever folded into the snapshot.

use crate::connector::Connector;
use crate::organizations::OrganizationSyncer;
use crate::projects::ProjectSyncer;
use crate::teams::TeamSyncer;
use crate::users::UserSyncer;
use chrono::{DateTime, Utc};
use errors::ConnectorResult;
use fl_core::{
    Entitlement, Grant, Resource, ResourceKey, ResourceSyncer, ResourceType,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub organizations: u32,
    pub users: u32,
    pub teams: u32,
    pub projects: u32,
    pub entitlements: u32,
    pub grants: u32
}

impl SyncReport {
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    pub fn total_resources(&self) -> u32 {
        self.organizations + self.users + self.teams + self.projects
    }

    fn count(&mut self, resource_type: ResourceType, n: u32) {
        match resource_type {
            ResourceType::Organization => self.organizations += n,
            ResourceType::User => self.users += n,
            ResourceType::Team => self.teams += n,
            ResourceType::Project => self.projects += n
        }
    }
}

/// Everything one sync pass produced. Recomputed fresh every pass;
/// nothing is cached across calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub resources: Vec<Resource>,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
    pub report: SyncReport
}

pub struct SyncEngine {
    connector: Connector
}

impl SyncEngine {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    pub async fn sync_all(&self) -> ConnectorResult<SyncSnapshot> {
        let mut report = SyncReport::new();
        let mut snapshot = SyncSnapshot::default();
        info!("starting full hierarchy sync");

        let client = self.connector.client.clone();
        let org_syncer = OrganizationSyncer::new(client.clone());
        let child_syncers: Vec<Arc<dyn ResourceSyncer>> = vec![
            Arc::new(UserSyncer::new(client.clone())),
            Arc::new(TeamSyncer::new(client.clone())),
            Arc::new(ProjectSyncer::new(client)),
        ];

        let organizations = collect_resources(&org_syncer, None).await?;
        info!(count = organizations.len(), "fetched organizations");

        for org in &organizations {
            let org_key = org.key();
            self.collect_container_output(&org_syncer, org, &mut report, &mut snapshot)
                .await?;

            for syncer in &child_syncers {
                let children = collect_resources(syncer.as_ref(), Some(&org_key)).await?;
                debug!(
                    org_id = %org.id,
                    resource_type = %syncer.resource_type(),
                    count = children.len(),
                    "fetched child collection"
                );

                for child in &children {
                    if child.resource_type.is_container() {
                        self.collect_container_output(
                            syncer.as_ref(),
                            child,
                            &mut report,
                            &mut snapshot
                        )
                        .await?;
                    }
                }

                report.count(syncer.resource_type(), children.len() as u32);
                snapshot.resources.extend(children);
            }
        }

        report.count(ResourceType::Organization, organizations.len() as u32);
        snapshot.resources.extend(organizations);

        report.complete();
        info!(
            organizations = report.organizations,
            users = report.users,
            teams = report.teams,
            projects = report.projects,
            entitlements = report.entitlements,
            grants = report.grants,
            "sync completed"
        );

        snapshot.report = report;
        Ok(snapshot)
    }

    async fn collect_container_output(
        &self,
        syncer: &dyn ResourceSyncer,
        resource: &Resource,
        report: &mut SyncReport,
        snapshot: &mut SyncSnapshot
    ) -> ConnectorResult<()> {
        let entitlements = syncer.entitlements(resource).await?;
        let grants = collect_grants(syncer, resource).await?;

        report.entitlements += entitlements.len() as u32;
        report.grants += grants.len() as u32;
        snapshot.entitlements.extend(entitlements);
        snapshot.grants.extend(grants);
        Ok(())
    }
}

/// Exhaust one collection page by page. The cursor from each page feeds
/// the next request; pages are requested strictly in cursor order.
pub async fn collect_resources(
    syncer: &dyn ResourceSyncer,
    parent: Option<&ResourceKey>
) -> ConnectorResult<Vec<Resource>> {
    let mut all = Vec::new();
    let mut cursor = String::new();

    loop {
        let page = syncer.list(parent, &cursor).await?;
        let has_next = page.has_next();
        all.extend(page.resources);

        if !has_next {
            break;
        }
        cursor = page.next_cursor;
    }

    Ok(all)
}

pub async fn collect_grants(
    syncer: &dyn ResourceSyncer,
    resource: &Resource
) -> ConnectorResult<Vec<Grant>> {
    let mut all = Vec::new();
    let mut cursor = String::new();

    loop {
        let page = syncer.grants(resource, &cursor).await?;
        let has_next = page.has_next();
        all.extend(page.grants);

        if !has_next {
            break;
        }
        cursor = page.next_cursor;
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_report_counters() {
        let mut report = SyncReport::new();
        assert!(report.started_at.is_some());
        assert!(report.completed_at.is_none());

        report.count(ResourceType::Organization, 1);
        report.count(ResourceType::User, 140);
        report.count(ResourceType::Team, 3);
        assert_eq!(report.total_resources(), 144);

        report.complete();
        assert!(report.completed_at.is_some());
    }
}
