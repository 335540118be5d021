//! Integration tests for authentication flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({"username": "empty", "password": "empty"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());
    assert_eq!(response.body["data"]["token_type"], "Bearer");
    assert_eq!(response.body["data"]["user"]["username"], "empty");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({"username": "empty", "password": "wrong"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["observer"], "core.exception");
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/me", None, Some(&app.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "empty");
    assert_eq!(response.body["data"]["is_superuser"], true);
}

#[tokio::test]
async fn test_screens_require_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/documents/documentList", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/documents/documentList", None, Some("garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
    assert_eq!(response.body["data"]["storage"], "available");
}

#[tokio::test]
async fn test_health_degraded_without_storage() {
    let app = TestApp::new().await;
    std::fs::remove_dir_all(app.data_dir.path().join("usr")).unwrap();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "degraded");
    assert_eq!(response.body["data"]["storage"], "unavailable");
}
