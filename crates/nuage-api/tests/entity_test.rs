#![allow(clippy::unwrap_used)]
// Integration tests for the typed entity operations using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nuage_api::schema::DEFAULT_ENTERPRISE_DESCRIPTION;
use nuage_api::{
    Domain, EntityKind, EntityMeta, Enterprise, Error, ListScope, Session, Subnet, VMInterface,
    VPort, Zone,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// A mock controller and a session already authenticated against it.
async fn setup() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/nuage", server.uri())).unwrap();
    let mut session = Session::with_client(reqwest::Client::new(), base_url, "v3_2");

    Mock::given(method("GET"))
        .and(path("/nuage/api/v1_0/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "APIKey": "k-1", "userName": "admin", "enterpriseName": "acme"
        }])))
        .mount(&server)
        .await;

    session
        .authenticate("acme", "admin", &"secret".to_string().into())
        .await
        .unwrap();
    (server, session)
}

async fn unauthenticated() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/nuage", server.uri())).unwrap();
    let session = Session::with_client(reqwest::Client::new(), base_url, "v3_2");
    (server, session)
}

fn api_path(suffix: &str) -> String {
    format!("/nuage/api/v3_2/{suffix}")
}

/// Requests received after the login exchange.
async fn entity_requests(server: &MockServer) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| !r.url.path().ends_with("/me"))
        .collect()
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_enterprise_applies_default_and_merges_id() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("enterprises")))
        .and(body_json(json!({
            "name": "east",
            "description": DEFAULT_ENTERPRISE_DESCRIPTION
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "ID": "e-1",
            "name": "east",
            "description": DEFAULT_ENTERPRISE_DESCRIPTION,
            "creationDate": 1_450_000_000_000_i64,
            "lastUpdatedBy": "u-1",
            "owner": "u-1",
            "parentID": null,
            "entityScope": "ENTERPRISE"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut org = Enterprise {
        name: "east".into(),
        ..Enterprise::default()
    };
    session.create(&mut org).await.unwrap();

    assert_eq!(org.meta.id, "e-1");
    assert_eq!(org.name, "east");
    assert_eq!(org.description, DEFAULT_ENTERPRISE_DESCRIPTION);
    assert_eq!(org.meta.owner.as_deref(), Some("u-1"));
    assert_eq!(org.meta.entity_scope.as_deref(), Some("ENTERPRISE"));
}

#[tokio::test]
async fn test_create_keeps_fields_the_server_does_not_echo() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("domains/d-1/zones")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "ID": "z-1" }])))
        .mount(&server)
        .await;

    let mut zone = Zone {
        name: "web".into(),
        template_id: "zt-1".into(),
        meta: EntityMeta::under("d-1"),
        ..Zone::default()
    };
    session.create(&mut zone).await.unwrap();

    assert_eq!(zone.meta.id, "z-1");
    assert_eq!(zone.name, "web");
    assert_eq!(zone.template_id, "zt-1");
    assert_eq!(zone.meta.parent_id, "d-1");
}

#[tokio::test]
async fn test_create_conflict_is_unexpected_status() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("enterprises/e-1/domains")))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({
                "errors": [{ "property": "name", "descriptions": [{ "title": "Duplicate" }] }]
            })),
        )
        .mount(&server)
        .await;

    let mut domain = Domain {
        name: "prod".into(),
        template_id: "dt-1".into(),
        meta: EntityMeta::under("e-1"),
        ..Domain::default()
    };
    let err = session.create(&mut domain).await.unwrap_err();

    match err {
        Error::UnexpectedStatus { code, expected, body } => {
            assert_eq!((code, expected), (409, 201));
            assert!(body.contains("Duplicate"));
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
    assert!(domain.meta.id.is_empty());
}

#[tokio::test]
async fn test_create_validation_sends_nothing() {
    let (server, session) = setup().await;

    let mut subnet = Subnet {
        name: "s1".into(),
        address: "10.1.0.0".into(),
        meta: EntityMeta::under("z-1"),
        ..Subnet::default()
    };
    let err = session.create(&mut subnet).await.unwrap_err();
    assert!(matches!(err, Error::Validation { entity: "Subnet", .. }));

    let mut nic = VMInterface {
        mac: "52:54:00:00:00:01".into(),
        meta: EntityMeta::under("vm-1"),
        ..VMInterface::default()
    };
    let err = session.create(&mut nic).await.unwrap_err();
    assert!(matches!(err, Error::Validation { entity: "VMInterface", .. }));

    assert!(entity_requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_create_vport_under_subnet() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("subnets/s-1/vports")))
        .and(body_json(json!({
            "name": "p1",
            "type": "VM",
            "addressSpoofing": "INHERITED",
            "active": true,
            "parentID": "s-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "ID": "vp-1", "name": "p1", "type": "VM", "addressSpoofing": "INHERITED",
            "active": true, "parentID": "s-1", "parentType": "subnet",
            "domainID": "d-1", "zoneID": "z-1"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut vport = VPort {
        name: "p1".into(),
        port_type: "VM".into(),
        address_spoofing: "INHERITED".into(),
        active: true,
        meta: EntityMeta::under("s-1"),
        ..VPort::default()
    };
    session.create(&mut vport).await.unwrap();

    assert_eq!(vport.meta.id, "vp-1");
    assert_eq!(vport.domain_id.as_deref(), Some("d-1"));
    assert_eq!(vport.meta.parent_type.as_deref(), Some("subnet"));
}

// ── Get ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_decodes_single_element_array() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("zones/z-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "ID": "z-1", "name": "web", "parentID": "d-1", "parentType": "domain",
            "templateID": null, "IPType": "IPV4"
        }])))
        .mount(&server)
        .await;

    let zone: Zone = session.fetch("z-1").await.unwrap();
    assert_eq!(zone.name, "web");
    assert_eq!(zone.meta.parent_id, "d-1");
    assert_eq!(zone.ip_type.as_deref(), Some("IPV4"));
}

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("domains/d-1/zones")))
        .and(body_json(json!({"name": "web", "parentID": "d-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "ID": "z-9", "name": "web", "parentID": "d-1", "parentType": "domain"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("zones/z-9")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "ID": "z-9", "name": "web", "parentID": "d-1", "parentType": "domain"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut created = Zone {
        name: "web".into(),
        meta: EntityMeta::under("d-1"),
        ..Zone::default()
    };
    session.create(&mut created).await.unwrap();
    assert_eq!(created.meta.id, "z-9");

    let fetched: Zone = session.fetch(&created.meta.id).await.unwrap();
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.meta.parent_id, created.meta.parent_id);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_requires_id() {
    let (server, session) = setup().await;

    let mut zone = Zone::default();
    let err = session.get(&mut zone).await.unwrap_err();
    assert!(matches!(err, Error::Validation { entity: "Zone", .. }));
    assert!(entity_requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_get_empty_array_is_decode_error() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("domains/d-9")))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let err = session.fetch::<Domain>("d-9").await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_no_content() {
    let (server, session) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("zones/z-1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let zone = Zone {
        meta: EntityMeta::with_id("z-1"),
        ..Zone::default()
    };
    session.delete(&zone).await.unwrap();
}

#[tokio::test]
async fn test_delete_confirms_after_300() {
    let (server, session) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("enterprises/e-1")))
        .and(query_param("responseChoice", "1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(api_path("enterprises/e-1")))
        .and(query_param_is_missing("responseChoice"))
        .respond_with(ResponseTemplate::new(300).set_body_json(json!({
            "errors": [{ "descriptions": [{ "title": "Confirm deletion of enterprise" }] }],
            "choices": [{ "id": 1, "label": "OK" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let org = Enterprise {
        meta: EntityMeta::with_id("e-1"),
        ..Enterprise::default()
    };
    session.delete(&org).await.unwrap();
}

#[tokio::test]
async fn test_delete_second_300_fails_after_two_requests() {
    let (server, session) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("enterprises/e-1")))
        .respond_with(ResponseTemplate::new(300))
        .mount(&server)
        .await;

    let org = Enterprise {
        meta: EntityMeta::with_id("e-1"),
        ..Enterprise::default()
    };
    let err = session.delete(&org).await.unwrap_err();

    assert!(matches!(
        err,
        Error::UnexpectedStatus { code: 300, expected: 204, .. }
    ));

    let deletes = entity_requests(&server).await;
    assert_eq!(deletes.len(), 2);
    assert_eq!(deletes[0].url.query(), None);
    assert_eq!(deletes[1].url.query(), Some("responseChoice=1"));
}

#[tokio::test]
async fn test_delete_nonexistent_is_unexpected_status() {
    let (server, session) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("subnets/gone")))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let subnet = Subnet {
        meta: EntityMeta::with_id("gone"),
        ..Subnet::default()
    };
    let err = session.delete(&subnet).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(entity_requests(&server).await.len(), 1);
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_empty_body_is_empty_list() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("enterprises/e-1/domains")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let domains: Vec<Domain> = session
        .list(&ListScope::parent(EntityKind::Enterprise, "e-1"))
        .await
        .unwrap();
    assert!(domains.is_empty());
}

#[tokio::test]
async fn test_list_global_vs_scoped() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("zones")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": "z-1", "name": "web", "parentID": "d-1" },
            { "ID": "z-2", "name": "db", "parentID": "d-2" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("domains/d-2/zones")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": "z-2", "name": "db", "parentID": "d-2" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let all: Vec<Zone> = session
        .list(&ListScope::from_parent_id(EntityKind::Zone, ""))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let scoped: Vec<Zone> = session
        .list(&ListScope::from_parent_id(EntityKind::Zone, "d-2"))
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].meta.id, "z-2");
    assert!(scoped.iter().all(|z| z.meta.parent_id == "d-2"));
}

#[tokio::test]
async fn test_list_invalid_scope_sends_nothing() {
    let (server, session) = setup().await;

    let err = session
        .list::<VPort>(&ListScope::Global)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { entity: "VPort", .. }));
    assert!(entity_requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_list_decode_failure_aborts() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("enterprises")))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"ID": "e-1"}, 42]"#))
        .mount(&server)
        .await;

    let err = session
        .list::<Enterprise>(&ListScope::Global)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

// ── Unauthenticated ─────────────────────────────────────────────────

#[tokio::test]
async fn test_every_operation_requires_credential() {
    let (server, session) = unauthenticated().await;

    let mut org = Enterprise {
        name: "east".into(),
        ..Enterprise::default()
    };
    assert!(matches!(
        session.create(&mut org).await,
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(
        session.fetch::<Enterprise>("e-1").await,
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(
        session.delete(&org).await,
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(
        session.list::<Enterprise>(&ListScope::Global).await,
        Err(Error::NotAuthenticated)
    ));
    // Even a request that would fail validation reports the missing credential.
    assert!(matches!(
        session.get(&mut Zone::default()).await,
        Err(Error::NotAuthenticated)
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}
