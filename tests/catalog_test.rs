//! Brand and product catalog behavior: CRUD, payload field names, SKU and
//! name uniqueness, and the public storefront view.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, TestApp};
use pharmacy_api::auth::AdminLevel;

async fn admin_app() -> (TestApp, String) {
    let app = TestApp::new().await;
    let (_, token) = app
        .seed_admin("catalog@example.com", "admin-pw-123", AdminLevel::Standard)
        .await;
    (app, token)
}

#[tokio::test]
async fn brand_crud_round_trip() {
    let (app, token) = admin_app().await;

    let create = app
        .post(
            "/products/brands",
            Some(&token),
            json!({
                "brandName": "Acme Pharma",
                "originCountry": "DE",
                "manufacturerName": "Acme GmbH",
                "webURL": "https://acme.example.com"
            }),
        )
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let created = body_json(create).await;
    let id = created["brandID"].as_i64().unwrap();
    assert_eq!(created["brandName"], "Acme Pharma");
    assert_eq!(created["webURL"], "https://acme.example.com");
    assert_eq!(created["isActive"], true);

    let fetched = app
        .get(&format!("/products/brands/{id}"), Some(&token))
        .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["brandID"].as_i64().unwrap(), id);

    let update = app
        .put(
            &format!("/products/brands/{id}"),
            Some(&token),
            json!({ "originCountry": "CH", "isActive": false }),
        )
        .await;
    assert_eq!(update.status(), StatusCode::OK);
    let updated = body_json(update).await;
    assert_eq!(updated["originCountry"], "CH");
    assert_eq!(updated["isActive"], false);
    // Untouched fields survive a partial update.
    assert_eq!(updated["brandName"], "Acme Pharma");

    let delete = app
        .delete(&format!("/products/brands/{id}"), Some(&token))
        .await;
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    let gone = app
        .get(&format!("/products/brands/{id}"), Some(&token))
        .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_brand_name_conflicts() {
    let (app, token) = admin_app().await;
    app.create_brand(&token, "Acme").await;

    let dup = app
        .post("/products/brands", Some(&token), json!({ "brandName": "Acme" }))
        .await;
    assert_eq!(dup.status(), StatusCode::CONFLICT);

    // Renaming another brand onto a taken name also conflicts.
    let other = app.create_brand(&token, "Other").await;
    let rename = app
        .put(
            &format!("/products/brands/{other}"),
            Some(&token),
            json!({ "brandName": "Acme" }),
        )
        .await;
    assert_eq!(rename.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_brand_returns_404() {
    let (app, token) = admin_app().await;

    let fetched = app.get("/products/brands/9999", Some(&token)).await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);

    let deleted = app.delete("/products/brands/9999", Some(&token)).await;
    assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn brand_list_is_paginated() {
    let (app, token) = admin_app().await;
    for name in ["Alpha", "Beta", "Gamma"] {
        app.create_brand(&token, name).await;
    }

    let page = app
        .get("/products/brands?page=1&per_page=2", Some(&token))
        .await;
    assert_eq!(page.status(), StatusCode::OK);
    let body = body_json(page).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);

    let page2 = app
        .get("/products/brands?page=2&per_page=2", Some(&token))
        .await;
    let body = body_json(page2).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn product_crud_round_trip() {
    let (app, token) = admin_app().await;
    let brand_id = app.create_brand(&token, "Acme").await;

    let create = app
        .post(
            "/products",
            Some(&token),
            json!({
                "name": "Ibuprofen 400mg",
                "description": "Pain relief",
                "sku": "IBU-400",
                "price": "9.99",
                "brandId": brand_id,
                "requiresPrescription": false,
                "stockQuantity": 120
            }),
        )
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let created = body_json(create).await;
    let id = created["productId"].as_i64().unwrap();
    assert_eq!(created["sku"], "IBU-400");
    assert_eq!(created["brandId"].as_i64().unwrap(), i64::from(brand_id));

    let update = app
        .put(
            &format!("/products/{id}"),
            Some(&token),
            json!({ "price": "12.50", "stockQuantity": 80 }),
        )
        .await;
    assert_eq!(update.status(), StatusCode::OK);
    let updated = body_json(update).await;
    assert_eq!(updated["price"], "12.50");
    assert_eq!(updated["stockQuantity"], 80);

    let delete = app.delete(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);
    let gone = app.get(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_sku_conflicts() {
    let (app, token) = admin_app().await;

    let payload = json!({ "name": "Aspirin", "sku": "ASP-100", "price": "4.99" });
    let first = app.post("/products", Some(&token), payload.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.post("/products", Some(&token), payload).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_brand_reference_is_rejected() {
    let (app, token) = admin_app().await;

    let create = app
        .post(
            "/products",
            Some(&token),
            json!({ "name": "Aspirin", "sku": "ASP-100", "price": "4.99", "brandId": 424242 }),
        )
        .await;
    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let (app, token) = admin_app().await;

    let create = app
        .post(
            "/products",
            Some(&token),
            json!({ "name": "Aspirin", "sku": "ASP-100", "price": "-4.99" }),
        )
        .await;
    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storefront_hides_inactive_products() {
    let (app, token) = admin_app().await;

    let active = app
        .post(
            "/products",
            Some(&token),
            json!({ "name": "Visible", "sku": "VIS-1", "price": "1.00" }),
        )
        .await;
    assert_eq!(active.status(), StatusCode::CREATED);

    let inactive = app
        .post(
            "/products",
            Some(&token),
            json!({ "name": "Hidden", "sku": "HID-1", "price": "1.00", "isActive": false }),
        )
        .await;
    assert_eq!(inactive.status(), StatusCode::CREATED);
    let hidden_id = body_json(inactive).await["productId"].as_i64().unwrap();

    // Anonymous storefront: one product, and the hidden one 404s.
    let listing = app.get("/products", None).await;
    assert_eq!(listing.status(), StatusCode::OK);
    let body = body_json(listing).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Visible");

    let hidden = app.get(&format!("/products/{hidden_id}"), None).await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    // Staff see everything.
    let staff_listing = app.get("/products", Some(&token)).await;
    let body = body_json(staff_listing).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let staff_hidden = app.get(&format!("/products/{hidden_id}"), Some(&token)).await;
    assert_eq!(staff_hidden.status(), StatusCode::OK);
}

#[tokio::test]
async fn customer_browses_storefront_like_anonymous() {
    let (app, admin_token) = admin_app().await;
    let (_, customer_token) = app.seed_customer("shopper@example.com", "shopper-pw-1").await;

    let inactive = app
        .post(
            "/products",
            Some(&admin_token),
            json!({ "name": "Hidden", "sku": "HID-2", "price": "1.00", "isActive": false }),
        )
        .await;
    assert_eq!(inactive.status(), StatusCode::CREATED);

    let listing = app.get("/products", Some(&customer_token)).await;
    assert_eq!(listing.status(), StatusCode::OK);
    let body = body_json(listing).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
