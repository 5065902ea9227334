//! Role-based access control matrix: which account type can reach which
//! route, and with what failure status when it cannot.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, TestApp};
use pharmacy_api::auth::{AdminLevel, PharmacistRole};

fn brand_payload(name: &str) -> serde_json::Value {
    json!({ "brandName": name })
}

fn pharmacist_payload(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "email": email,
        "phone": phone,
        "password": "pharmacist-pw-1",
        "first_name": "Parker",
        "last_name": "Pharmacist",
        "pharmacist_role": "PHARMACIST",
        "license_number": "RX-1001",
        "license_state": "CA",
        "license_expiry_date": "2030-01-01"
    })
}

fn admin_payload(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "email": email,
        "phone": phone,
        "password": "admin-pw-12345",
        "first_name": "Avery",
        "last_name": "Admin"
    })
}

#[tokio::test]
async fn customer_is_locked_out_of_staff_surfaces() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_customer("shopper@example.com", "shopper-pw-1").await;

    let create = app
        .post("/products/brands", Some(&token), brand_payload("Acme"))
        .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);

    let list = app.get("/products/brands", Some(&token)).await;
    assert_eq!(list.status(), StatusCode::FORBIDDEN);

    let admin_list = app.get("/admin/customers", Some(&token)).await;
    assert_eq!(admin_list.status(), StatusCode::FORBIDDEN);

    let onboard = app
        .post(
            "/auth/register/pharmacist",
            Some(&token),
            pharmacist_payload("p1@example.com", "+14155550201"),
        )
        .await;
    assert_eq!(onboard.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn staff_pharmacist_reads_but_cannot_write_catalog() {
    let app = TestApp::new().await;
    let (_, token) = app
        .seed_pharmacist("staff@example.com", "staff-pw-123", PharmacistRole::Pharmacist)
        .await;

    let list = app.get("/products/brands", Some(&token)).await;
    assert_eq!(list.status(), StatusCode::OK);

    let create = app
        .post("/products/brands", Some(&token), brand_payload("Acme"))
        .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);
    let body = body_json(create).await;
    assert!(body["message"].as_str().unwrap().contains("LEAD_PHARMACIST"));
}

#[tokio::test]
async fn lead_pharmacist_creates_but_cannot_delete() {
    let app = TestApp::new().await;
    let (_, token) = app
        .seed_pharmacist("lead@example.com", "lead-pw-1234", PharmacistRole::LeadPharmacist)
        .await;

    let create = app
        .post("/products/brands", Some(&token), brand_payload("Acme"))
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let id = body_json(create).await["brandID"].as_i64().unwrap();

    // Updates and deletes stay admin-only.
    let update = app
        .put(
            &format!("/products/brands/{id}"),
            Some(&token),
            json!({ "brandName": "Acme Renamed" }),
        )
        .await;
    assert_eq!(update.status(), StatusCode::FORBIDDEN);

    let delete = app
        .delete(&format!("/products/brands/{id}"), Some(&token))
        .await;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn lead_pharmacist_manages_product_lifecycle() {
    let app = TestApp::new().await;
    let (_, lead_token) = app
        .seed_pharmacist("lead3@example.com", "lead-pw-1234", PharmacistRole::LeadPharmacist)
        .await;
    let (_, staff_token) = app
        .seed_pharmacist("staff3@example.com", "staff-pw-123", PharmacistRole::Pharmacist)
        .await;

    let create = app
        .post(
            "/products",
            Some(&lead_token),
            json!({ "name": "Ibuprofen 400mg", "sku": "IBU-400", "price": "9.99" }),
        )
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let id = body_json(create).await["productId"].as_i64().unwrap();

    let update = app
        .put(
            &format!("/products/{id}"),
            Some(&lead_token),
            json!({ "stockQuantity": 50 }),
        )
        .await;
    assert_eq!(update.status(), StatusCode::OK);

    // Deletion follows the same catalog-manager rule as create and update.
    let staff_delete = app.delete(&format!("/products/{id}"), Some(&staff_token)).await;
    assert_eq!(staff_delete.status(), StatusCode::FORBIDDEN);

    let lead_delete = app.delete(&format!("/products/{id}"), Some(&lead_token)).await;
    assert_eq!(lead_delete.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn admin_has_full_catalog_access() {
    let app = TestApp::new().await;
    let (_, token) = app
        .seed_admin("admin@example.com", "admin-pw-123", AdminLevel::Standard)
        .await;

    let id = app.create_brand(&token, "Acme").await;

    let update = app
        .put(
            &format!("/products/brands/{id}"),
            Some(&token),
            json!({ "brandName": "Acme Renamed" }),
        )
        .await;
    assert_eq!(update.status(), StatusCode::OK);

    let delete = app
        .delete(&format!("/products/brands/{id}"), Some(&token))
        .await;
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unauthenticated_requests_get_401_not_403() {
    let app = TestApp::new().await;

    let list = app.get("/products/brands", None).await;
    assert_eq!(list.status(), StatusCode::UNAUTHORIZED);

    let admin_list = app.get("/admin/pharmacists", None).await;
    assert_eq!(admin_list.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_admins_onboard_pharmacists() {
    let app = TestApp::new().await;
    let (_, lead_token) = app
        .seed_pharmacist("lead2@example.com", "lead-pw-1234", PharmacistRole::LeadPharmacist)
        .await;
    let (admin, admin_token) = app
        .seed_admin("hr@example.com", "admin-pw-123", AdminLevel::Standard)
        .await;

    let denied = app
        .post(
            "/auth/register/pharmacist",
            Some(&lead_token),
            pharmacist_payload("p2@example.com", "+14155550202"),
        )
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let created = app
        .post(
            "/auth/register/pharmacist",
            Some(&admin_token),
            pharmacist_payload("p2@example.com", "+14155550202"),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = body_json(created).await;
    assert_eq!(body["user_type"], "PHARMACIST");
    assert_eq!(body["pharmacist_role"], "PHARMACIST");

    // The onboarded pharmacist records which admin registered them.
    let row = app.find_pharmacist("p2@example.com").await;
    assert_eq!(row.assigned_by, Some(admin.id));
}

#[tokio::test]
async fn only_super_admins_create_admins() {
    let app = TestApp::new().await;
    let (_, standard_token) = app
        .seed_admin("standard@example.com", "admin-pw-123", AdminLevel::Standard)
        .await;
    let (_, super_token) = app
        .seed_admin("root@example.com", "admin-pw-123", AdminLevel::Super)
        .await;

    let denied = app
        .post(
            "/auth/register/admin",
            Some(&standard_token),
            admin_payload("new-admin@example.com", "+14155550203"),
        )
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let created = app
        .post(
            "/auth/register/admin",
            Some(&super_token),
            admin_payload("new-admin@example.com", "+14155550203"),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = body_json(created).await;
    // Level defaults to STANDARD when omitted.
    assert_eq!(body["admin_level"], "STANDARD");
}
