//! Integration tests for the HTTP backend against a mock server
//!
//! These tests verify request shapes, that the reply body's own status is
//! what callers see, and how transport and parse failures are classified.

use formgate_core::{
    list_users, Backend, Endpoint, Error, ErrorClassification, HttpBackend, HttpBackendConfig,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(HttpBackendConfig::default().with_base_url(server.uri()))
        .expect("Failed to build backend")
}

/// Address of a local port nothing listens on
fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

#[tokio::test]
async fn test_login_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Bob", "password": "Abc123!@"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": 200, "userId": "u1", "name": "Bob"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend_for(&server)
        .send(
            Endpoint::Login,
            Some(&json!({"name": "Bob", "password": "Abc123!@"})),
        )
        .await
        .expect("Login request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.user_id.as_deref(), Some("u1"));
}

#[tokio::test]
async fn test_body_status_wins_over_http_status() {
    let server = MockServer::start().await;
    // The backend answers 200 on the wire while reporting 401 in the body
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": 401, "message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let reply = backend_for(&server)
        .send(Endpoint::Login, Some(&json!({"name": "Bob", "password": "x"})))
        .await
        .unwrap();
    assert_eq!(reply.status, 401);

    // And an error status with a parseable body is still a reply
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/createUser"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"status": 500, "message": "Error creating user"})),
        )
        .mount(&server)
        .await;

    let reply = backend_for(&server)
        .send(Endpoint::CreateUser, Some(&json!({})))
        .await
        .unwrap();
    assert_eq!(reply.status, 500);
    assert_eq!(reply.message_text(), Some("Error creating user"));
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .send(Endpoint::Login, Some(&json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.classification, ErrorClassification::ParseError);
    assert_eq!(err.status_code, Some(200));
}

#[tokio::test]
async fn test_bodyless_error_status_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .send(Endpoint::Login, Some(&json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.classification, ErrorClassification::ServerError);
    assert_eq!(err.status_code, Some(503));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let uri = closed_port_uri();

    let backend = HttpBackend::new(HttpBackendConfig::default().with_base_url(uri)).unwrap();
    let err = backend
        .send(Endpoint::Login, Some(&json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.classification, ErrorClassification::NetworkError);
    assert_eq!(err.status_code, None);
}

#[tokio::test]
async fn test_list_users_via_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/getAllUsers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "users": [
                {"id": "u1", "name": "Ada", "gender": "FEMALE", "password": "secret"},
                {"id": "u2", "name": "Bob", "dateOfBirth": "1990-01-01T00:00:00.000Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = list_users(&backend_for(&server)).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].gender.as_deref(), Some("FEMALE"));
    assert_eq!(
        users[1].date_of_birth.as_deref(),
        Some("1990-01-01T00:00:00.000Z")
    );
}

#[tokio::test]
async fn test_list_users_reports_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/getAllUsers"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"status": 500, "message": "Error fetching users"})),
        )
        .mount(&server)
        .await;

    match list_users(&backend_for(&server)).await {
        Err(Error::Http(err)) => {
            assert_eq!(err.status_code, Some(500));
            assert_eq!(err.message, "Error fetching users");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}
