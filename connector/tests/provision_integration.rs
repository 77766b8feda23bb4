use client::FaultlineClient;
use connector::projects::ProjectSyncer;
use connector::teams::TeamSyncer;
use connector::users::UserSyncer;
use fl_core::{
    ASSIGNMENT, AccountManager, Entitlement, Grant, MEMBERSHIP, Profile, Provisioner,
    ProvisionOutcome, Resource, ResourceKey, ResourceType,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn team_resource() -> Resource {
    Resource {
        id: "acme/4711".to_string(),
        resource_type: ResourceType::Team,
        display_name: "Engineering".to_string(),
        parent_id: Some("acme".to_string()),
        profile: Profile::new(),
    }
}

fn project_resource() -> Resource {
    Resource {
        id: "900".to_string(),
        resource_type: ResourceType::Project,
        display_name: "Web".to_string(),
        parent_id: Some("acme".to_string()),
        profile: Profile::new(),
    }
}

fn member_detail(teams: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "7",
        "email": "user7@acme.io",
        "name": "User 7",
        "orgRole": "member",
        "teams": teams
    })
}

async fn test_client(server: &MockServer) -> Arc<FaultlineClient> {
    Arc::new(FaultlineClient::new(&server.uri(), "token").unwrap())
}

#[tokio::test]
async fn test_team_grant_issues_write_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/members/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_detail(json!([]))))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/members/7/teams/4711/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let syncer = TeamSyncer::new(test_client(&server).await);
    let entitlement = Entitlement::assignment(&team_resource(), MEMBERSHIP, "Member".to_string());
    let principal = ResourceKey::new(ResourceType::User, "7");

    let outcome = syncer.grant(&principal, &entitlement).await.unwrap();
    assert_eq!(outcome, ProvisionOutcome::Granted);
    assert!(outcome.changed());
}

#[tokio::test]
async fn test_team_grant_already_member_skips_write() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/members/7/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(member_detail(json!(["Engineering"]))),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/members/7/teams/4711/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let syncer = TeamSyncer::new(test_client(&server).await);
    let entitlement = Entitlement::assignment(&team_resource(), MEMBERSHIP, "Member".to_string());
    let principal = ResourceKey::new(ResourceType::User, "7");

    let outcome = syncer.grant(&principal, &entitlement).await.unwrap();
    assert_eq!(outcome, ProvisionOutcome::AlreadyGranted);
    assert!(!outcome.changed());
}

#[tokio::test]
async fn test_team_revoke_absent_member_skips_write() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/members/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_detail(json!(["Design"]))))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/organizations/acme/members/7/teams/4711/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let syncer = TeamSyncer::new(test_client(&server).await);
    let grant = Grant::new(
        &team_resource(),
        MEMBERSHIP,
        ResourceKey::new(ResourceType::User, "7"),
    );

    let outcome = syncer.revoke(&grant).await.unwrap();
    assert_eq!(outcome, ProvisionOutcome::AlreadyRevoked);
}

#[tokio::test]
async fn test_team_grant_rejects_non_user_principal() {
    let server = MockServer::start().await;
    let syncer = TeamSyncer::new(test_client(&server).await);

    let entitlement = Entitlement::assignment(&team_resource(), MEMBERSHIP, "Member".to_string());
    let principal = ResourceKey::new(ResourceType::Team, "acme/other");

    let err = syncer.grant(&principal, &entitlement).await.unwrap_err();
    assert!(matches!(
        err,
        errors::ConnectorError::UnexpectedPrincipalType { .. }
    ));
}

#[tokio::test]
async fn test_project_grant_assigns_team_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/acme/900/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "900", "slug": "web", "name": "Web", "teams": []
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/projects/acme/900/teams/4711/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let syncer = ProjectSyncer::new(test_client(&server).await);
    let entitlement =
        Entitlement::assignment(&project_resource(), ASSIGNMENT, "Assignment".to_string());
    let principal = ResourceKey::new(ResourceType::Team, "acme/4711");

    let outcome = syncer.grant(&principal, &entitlement).await.unwrap();
    assert_eq!(outcome, ProvisionOutcome::Granted);
}

#[tokio::test]
async fn test_project_grant_already_assigned_skips_write() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/acme/900/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "900", "slug": "web", "name": "Web",
            "teams": [{"id": "4711", "name": "Engineering", "slug": "eng"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/projects/acme/900/teams/4711/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let syncer = ProjectSyncer::new(test_client(&server).await);
    let entitlement =
        Entitlement::assignment(&project_resource(), ASSIGNMENT, "Assignment".to_string());
    let principal = ResourceKey::new(ResourceType::Team, "acme/4711");

    let outcome = syncer.grant(&principal, &entitlement).await.unwrap();
    assert_eq!(outcome, ProvisionOutcome::AlreadyGranted);
}

#[tokio::test]
async fn test_project_revoke_unassigns_team() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/acme/900/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "900", "slug": "web", "name": "Web",
            "teams": [{"id": "4711", "name": "Engineering", "slug": "eng"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/projects/acme/900/teams/4711/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let syncer = ProjectSyncer::new(test_client(&server).await);
    let grant = Grant::new(
        &project_resource(),
        ASSIGNMENT,
        ResourceKey::new(ResourceType::Team, "acme/4711"),
    );

    let outcome = syncer.revoke(&grant).await.unwrap();
    assert_eq!(outcome, ProvisionOutcome::Revoked);
}

#[tokio::test]
async fn test_project_grant_malformed_team_id() {
    let server = MockServer::start().await;
    let syncer = ProjectSyncer::new(test_client(&server).await);

    let entitlement =
        Entitlement::assignment(&project_resource(), ASSIGNMENT, "Assignment".to_string());
    let principal = ResourceKey::new(ResourceType::Team, "4711");

    let err = syncer.grant(&principal, &entitlement).await.unwrap_err();
    assert!(matches!(
        err,
        errors::ConnectorError::InvalidCompositeId { .. }
    ));
}

#[tokio::test]
async fn test_create_account_invites_member() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/members/"))
        .and(body_json(json!({"email": "new@acme.io", "orgRole": "member"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let manager = UserSyncer::new(test_client(&server).await);
    let mut profile = serde_json::Map::new();
    profile.insert("email".to_string(), json!("new@acme.io"));
    profile.insert("orgID".to_string(), json!("acme"));
    profile.insert("orgRole".to_string(), json!("member"));

    manager.create_account(&profile).await.unwrap();
}

#[tokio::test]
async fn test_create_account_requires_email() {
    let server = MockServer::start().await;
    let manager = UserSyncer::new(test_client(&server).await);

    let mut profile = serde_json::Map::new();
    profile.insert("orgID".to_string(), json!("acme"));

    let err = manager.create_account(&profile).await.unwrap_err();
    assert!(matches!(
        err,
        errors::ConnectorError::MissingProfileField { field: "email" }
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_account_resolves_owning_org() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "acme", "slug": "acme", "name": "Acme"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/members/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_detail(json!([]))))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/organizations/acme/members/7/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let manager = UserSyncer::new(test_client(&server).await);
    manager.delete_account("7").await.unwrap();
}
