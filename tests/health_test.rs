mod common;

use axum::http::StatusCode;

use common::{body_json, TestApp};

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::new().await;

    let health = app.get("/health", None).await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(body_json(health).await["status"], "ok");

    let live = app.get("/health/live", None).await;
    assert_eq!(live.status(), StatusCode::OK);

    let ready = app.get("/health/ready", None).await;
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(body_json(ready).await["database"], "up");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"].get("/auth/login").is_some());
    assert!(doc["paths"].get("/products/brands").is_some());
    assert!(doc["paths"].get("/admin/customers").is_some());
}
