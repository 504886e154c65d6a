use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use cartera_portal::infra::auth_admin::HttpAuthAdminClient;
use cartera_portal::router::build_router;
use cartera_portal::state::AppState;

/// Router wired with a disconnected database — enough for routes that never
/// reach a repository (health checks, identity/role rejections).
fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        auth: HttpAuthAdminClient::new("http://localhost:9999", "test-key"),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_expose_health_endpoints() {
    let server = test_server();
    assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/readyz").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_reject_provisioning_without_identity_headers() {
    let server = test_server();
    let response = server
        .post("/portal-users")
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1",
            "nombre": "Ana",
            "cliente_id": Uuid::new_v4(),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_provisioning_for_non_admin_staff() {
    let server = test_server();
    let response = server
        .post("/portal-users")
        .add_header("x-cartera-user-id", Uuid::new_v4().to_string())
        .add_header("x-cartera-user-role", "1")
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1",
            "nombre": "Ana",
            "cliente_id": Uuid::new_v4(),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_diagnostic_for_non_admin_staff() {
    let server = test_server();
    let response = server
        .get("/portal-users/diagnostic?email=a@b.com")
        .add_header("x-cartera-user-id", Uuid::new_v4().to_string())
        .add_header("x-cartera-user-role", "0")
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
