//! Cross-referencing lookups that span collections.

use crate::client::FaultlineClient;
use crate::models::Organization;
use errors::{ConnectorError, ConnectorResult};
use tracing::{debug, warn};

/// Find the organization a member belongs to by probing each organization's
/// member-detail endpoint until one answers.
///
/// Linear in the number of organizations, and the first successful probe
/// wins. A 404 means "not in this org" and the scan continues; any other
/// per-org failure is skipped too, but logged at warn level so a transient
/// outage scanning as "not found" stays visible.
pub async fn find_user_org_id(
    client: &FaultlineClient,
    user_id: &str
) -> ConnectorResult<String> {
    let mut all_orgs: Vec<Organization> = Vec::new();
    let mut cursor = String::new();

    loop {
        let page = client.list_organizations(&cursor).await?;
        all_orgs.extend(page.items);

        if !page.page.has_next {
            break;
        }
        cursor = page.page.continuation();
    }

    for org in &all_orgs {
        match client.get_organization_member(&org.id, user_id).await {
            Ok(_) => return Ok(org.id.clone()),
            Err(err) if err.status() == Some(404) => {
                debug!(org_id = %org.id, user_id, "member not in organization");
            }
            Err(err) => {
                warn!(org_id = %org.id, user_id, error = %err, "member probe failed, treating as not in organization");
            }
        }
    }

    Err(ConnectorError::NotFound {
        what: "user organization",
        id: user_id.to_string()
    })
}
