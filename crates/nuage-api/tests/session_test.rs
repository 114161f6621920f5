#![allow(clippy::unwrap_used)]
// Integration tests for authentication and the transaction executor using wiremock.

use std::time::Duration;

use reqwest::Method;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nuage_api::{Error, Session, TlsMode, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/nuage", server.uri())).unwrap();
    let session = Session::with_client(reqwest::Client::new(), base_url, "v3_2");
    (server, session)
}

fn credential_body() -> serde_json::Value {
    json!([{
        "ID": "u-1",
        "APIKey": "0a1b2c3d-api-key",
        "APIKeyExpiry": 1_700_000_000_000_i64,
        "userName": "admin",
        "enterpriseName": "acme",
        "enterpriseID": "e-0",
        "role": "CSPROOT",
        "email": "admin@example.com"
    }])
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/nuage/api/v1_0/me"))
        .and(header("X-Nuage-Organization", "acme"))
        .and(header("Authorization", "XREST YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_body()))
        .mount(server)
        .await;
}

fn secret() -> SecretString {
    "secret".to_string().into()
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_authenticate_stores_credential() {
    let (server, mut session) = setup().await;
    mount_login(&server).await;

    let credential = session.authenticate("acme", "admin", &secret()).await.unwrap();
    assert_eq!(credential.enterprise_name, "acme");
    assert_eq!(credential.user_name, "admin");
    assert_eq!(credential.api_key(), "0a1b2c3d-api-key");

    assert!(session.is_authenticated());
    assert!(session.to_string().contains("Connected as user [admin], enterprise [acme]"));
}

#[tokio::test]
async fn test_authenticate_rejected() {
    let (server, mut session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/nuage/api/v1_0/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let result = session.authenticate("acme", "admin", &secret()).await;
    assert!(
        matches!(result, Err(Error::Authentication { status: Some(401), .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_authenticate_undecodable_body() {
    let (server, mut session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/nuage/api/v1_0/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = session.authenticate("acme", "admin", &secret()).await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_reauthenticate_replaces_credential() {
    let (server, mut session) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/nuage/api/v1_0/me"))
        .and(header("X-Nuage-Organization", "globex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "APIKey": "k-2", "userName": "ops", "enterpriseName": "globex"
        }])))
        .mount(&server)
        .await;

    session.authenticate("acme", "admin", &secret()).await.unwrap();
    session
        .authenticate("globex", "ops", &"pw".to_string().into())
        .await
        .unwrap();

    let credential = session.credential().unwrap();
    assert_eq!(credential.enterprise_name, "globex");
    assert_eq!(credential.api_key(), "k-2");
}

#[tokio::test]
async fn test_login_header_is_url_safe_base64() {
    let (server, mut session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/nuage/api/v1_0/me"))
        .and(header("Authorization", "XREST YWRtaW46fn5-Pg=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_body()))
        .expect(1)
        .mount(&server)
        .await;

    session
        .authenticate("acme", "admin", &"~~~>".to_string().into())
        .await
        .unwrap();
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_cleared_credential_blocks_requests() {
    let (server, mut session) = setup().await;
    mount_login(&server).await;
    session.authenticate("acme", "admin", &secret()).await.unwrap();

    session.clear_credential();
    assert!(!session.is_authenticated());
    assert!(session.credential().is_none());

    let url = session.api_url("enterprises").unwrap();
    let err = session.execute(Method::GET, url, None).await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));

    // Only the login reached the server.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    session.authenticate("acme", "admin", &secret()).await.unwrap();
    assert!(session.is_authenticated());
}

// ── Transaction executor ────────────────────────────────────────────

#[tokio::test]
async fn test_execute_sends_session_headers() {
    let (server, mut session) = setup().await;
    mount_login(&server).await;
    session.authenticate("acme", "admin", &secret()).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/nuage/api/v3_2/enterprises"))
        .and(header("X-Nuage-Organization", "acme"))
        .and(header("Authorization", "XREST YWRtaW46MGExYjJjM2QtYXBpLWtleQ=="))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let url = session.api_url("enterprises").unwrap();
    let reply = session.execute(Method::GET, url, None).await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body.as_ref(), b"[]");
}

#[tokio::test]
async fn test_execute_returns_error_statuses_uninterpreted() {
    let (server, mut session) = setup().await;
    mount_login(&server).await;
    session.authenticate("acme", "admin", &secret()).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/nuage/api/v3_2/zones/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such zone"))
        .mount(&server)
        .await;

    let url = session.api_url("zones/missing").unwrap();
    let reply = session.execute(Method::GET, url, None).await.unwrap();
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body.as_ref(), b"no such zone");
}

#[tokio::test]
async fn test_execute_posts_payload_verbatim() {
    let (server, mut session) = setup().await;
    mount_login(&server).await;
    session.authenticate("acme", "admin", &secret()).await.unwrap();

    Mock::given(method("POST"))
        .and(path("/nuage/api/v3_2/enterprises"))
        .and(body_string(r#"{"name":"east"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let url = session.api_url("enterprises").unwrap();
    let reply = session
        .execute(Method::POST, url, Some(br#"{"name":"east"}"#))
        .await
        .unwrap();
    assert_eq!(reply.status, 201);
}

#[tokio::test]
async fn test_execute_without_credential_makes_no_request() {
    let (server, session) = setup().await;

    let url = session.api_url("enterprises").unwrap();
    let err = session.execute(Method::GET, url, None).await.unwrap_err();

    assert!(matches!(err, Error::NotAuthenticated));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_controller_times_out() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/nuage", server.uri())).unwrap();
    let http = TransportConfig::default()
        .with_tls(TlsMode::System)
        .with_timeout(Duration::from_millis(200))
        .build_client()
        .unwrap();
    let mut session = Session::with_client(http, base_url, "v3_2");
    mount_login(&server).await;
    session.authenticate("acme", "admin", &secret()).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/nuage/api/v3_2/enterprises"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let url = session.api_url("enterprises").unwrap();
    let err = session.execute(Method::GET, url, None).await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err:?}");
    assert!(err.is_timeout());
}
