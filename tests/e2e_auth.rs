//! E2E tests for registration, login, and session handling

mod common;

use common::TestServer;
use serde_json::Value;

#[tokio::test]
async fn test_register_login_scenario() {
    let server = TestServer::new().await;

    // Registration succeeds
    let response = server.register("Sarah", "sarah@example.com", "pw123").await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Account created successfully");

    // Same email again conflicts
    let response = server
        .register("Sarah Again", "sarah@example.com", "other")
        .await;
    assert_eq!(response.status(), 409);

    // Login returns a token and the minimal identity
    let response = server
        .client
        .post(server.url("/auth/login"))
        .json(&serde_json::json!({
            "email": "sarah@example.com",
            "password": "pw123",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].as_str().unwrap().contains('.'));
    assert_eq!(body["user"]["name"], "Sarah");
    assert_eq!(body["user"]["email"], "sarah@example.com");
    assert!(body["user"]["id"].as_str().is_some());
    // The credential hash never leaves the server
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    // Wrong password fails with the generic message
    let response = server
        .client
        .post(server.url("/auth/login"))
        .json(&serde_json::json!({
            "email": "sarah@example.com",
            "password": "wrong",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let server = TestServer::new().await;

    let response = server.register("", "sarah@example.com", "pw123").await;
    assert_eq!(response.status(), 400);

    let response = server.register("Sarah", "sarah@example.com", "").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_unknown_email_gets_same_generic_message_as_wrong_password() {
    let server = TestServer::new().await;
    server.register("Sarah", "sarah@example.com", "pw123").await;

    let unknown = server
        .client
        .post(server.url("/auth/login"))
        .json(&serde_json::json!({"email": "nobody@example.com", "password": "pw123"}))
        .send()
        .await
        .unwrap();
    let wrong = server
        .client
        .post(server.url("/auth/login"))
        .json(&serde_json::json!({"email": "sarah@example.com", "password": "nope"}))
        .send()
        .await
        .unwrap();

    assert_eq!(unknown.status(), 401);
    assert_eq!(wrong.status(), 401);
    let unknown_body: Value = unknown.json().await.unwrap();
    let wrong_body: Value = wrong.json().await.unwrap();
    assert_eq!(unknown_body["error"], wrong_body["error"]);
}

#[tokio::test]
async fn test_protected_route_requires_session() {
    let server = TestServer::new().await;

    // No token
    let response = server
        .client
        .get(server.url("/api/v1/trends"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Garbage token
    let response = server
        .client
        .get(server.url("/api/v1/trends"))
        .header("Authorization", "Bearer not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let server = TestServer::new().await;
    let token = server.authenticated_token().await;

    // Flip a character inside the signed payload
    let mut tampered = token.clone().into_bytes();
    tampered[2] = if tampered[2] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = server
        .client
        .get(server.url("/api/v1/account"))
        .header("Authorization", format!("Bearer {}", tampered))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_session_token_resolves_to_identity() {
    let server = TestServer::new().await;
    let token = server.authenticated_token().await;

    let response = server
        .client
        .get(server.url("/api/v1/account"))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "sarah@example.com");
    assert_eq!(body["display_name"], "Sarah");
    assert_eq!(body["plan"], "free");
    assert_eq!(body["onboarding_complete"], false);
}

#[tokio::test]
async fn test_session_cookie_works_without_header() {
    let server = TestServer::new().await;
    let token = server.authenticated_token().await;

    let response = server
        .client
        .get(server.url("/api/v1/account"))
        .header("Cookie", format!("session={}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_logout_checkpoints_and_clears_cookie() {
    let server = TestServer::new().await;
    let token = server.authenticated_token().await;

    // Create some durable state first
    server
        .client
        .post(server.url("/api/v1/trends/4/bookmark"))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();

    let response = server
        .client
        .post(server.url("/auth/logout"))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Stateless tokens stay valid until expiry; the bookmark survives
    // the store eviction via its snapshot.
    let response = server
        .client
        .get(server.url("/api/v1/bookmarks"))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ids"], serde_json::json!(["4"]));
}
