//! Connector entry point: wires the shared client into one syncer per
//! resource type and describes the connector to the governance platform.

use crate::organizations::OrganizationSyncer;
use crate::projects::ProjectSyncer;
use crate::teams::TeamSyncer;
use crate::users::UserSyncer;
use client::FaultlineClient;
use errors::ConnectorResult;
use fl_core::types::ConnectorMetadata;
use fl_core::{AccountCreationSchema, AccountManager, Provisioner, ResourceSyncer, SchemaField};
use std::sync::Arc;
use tracing::info;

pub struct Connector {
    pub(crate) client: Arc<FaultlineClient>
}

impl Connector {
    pub fn new(base_url: &str, api_token: &str) -> ConnectorResult<Self> {
        Ok(Self {
            client: Arc::new(FaultlineClient::new(base_url, api_token)?)
        })
    }

    pub fn from_client(client: Arc<FaultlineClient>) -> Self {
        Self { client }
    }

    /// One syncer per resource type, in sync order: parents before
    /// children.
    pub fn syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        vec![
            Arc::new(OrganizationSyncer::new(self.client.clone())),
            Arc::new(UserSyncer::new(self.client.clone())),
            Arc::new(TeamSyncer::new(self.client.clone())),
            Arc::new(ProjectSyncer::new(self.client.clone())),
        ]
    }

    /// Reconciler for team membership grants.
    pub fn team_provisioner(&self) -> Arc<dyn Provisioner> {
        Arc::new(TeamSyncer::new(self.client.clone()))
    }

    /// Reconciler for team-to-project assignment grants.
    pub fn project_provisioner(&self) -> Arc<dyn Provisioner> {
        Arc::new(ProjectSyncer::new(self.client.clone()))
    }

    pub fn account_manager(&self) -> Arc<dyn AccountManager> {
        Arc::new(UserSyncer::new(self.client.clone()))
    }

    pub fn metadata() -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Faultline Connector".to_string(),
            description:
                "Syncs organizations, users, teams, and projects from Faultline and manages \
                 membership grants."
                    .to_string(),
            account_creation_schema: account_creation_schema()
        }
    }

    /// Exercise the credential by fetching the first organizations page.
    pub async fn validate(&self) -> ConnectorResult<()> {
        let page = self.client.list_organizations("").await?;
        info!(
            organizations = page.items.len(),
            "credential validated against organizations listing"
        );
        Ok(())
    }
}

fn account_creation_schema() -> AccountCreationSchema {
    AccountCreationSchema {
        fields: vec![
            SchemaField {
                name: "email".to_string(),
                display_name: "Email".to_string(),
                description: "The email address of the user.".to_string(),
                required: true,
                placeholder: "Email".to_string(),
                order: 1
            },
            SchemaField {
                name: "orgID".to_string(),
                display_name: "Organization ID".to_string(),
                description: "The ID of the organization to which the user will belong."
                    .to_string(),
                required: true,
                placeholder: "Organization ID".to_string(),
                order: 2
            },
            SchemaField {
                name: "orgRole".to_string(),
                display_name: "Organization Role".to_string(),
                description: "The role of the user in the organization.".to_string(),
                required: false,
                placeholder: "Organization Role".to_string(),
                order: 3
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syncers_cover_every_type_parents_first() {
        let connector = Connector::new("https://faultline.io/api/0/", "token").unwrap();
        let types: Vec<_> = connector
            .syncers()
            .iter()
            .map(|s| s.resource_type())
            .collect();
        assert_eq!(
            types,
            vec![
                fl_core::ResourceType::Organization,
                fl_core::ResourceType::User,
                fl_core::ResourceType::Team,
                fl_core::ResourceType::Project,
            ]
        );
    }

    #[test]
    fn test_metadata_schema_fields() {
        let metadata = Connector::metadata();
        let fields = &metadata.account_creation_schema.fields;
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().any(|f| f.name == "email" && f.required));
        assert!(fields.iter().any(|f| f.name == "orgID" && f.required));
        assert!(fields.iter().any(|f| f.name == "orgRole" && !f.required));
    }
}
