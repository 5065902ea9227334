//! Shared harness for integration tests: a full application router backed by
//! a throwaway SQLite database, plus seeding helpers for the three account
//! tables.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use pharmacy_api::auth::{self, AdminLevel, PharmacistRole, TokenSubject, UserType};
use pharmacy_api::config::AppConfig;
use pharmacy_api::db;
use pharmacy_api::entities::{admin, customer, pharmacist};
use pharmacy_api::{app_router, AppState};

const TEST_JWT_SECRET: &str =
    "integration-test-secret-integration-test-secret-integration-test-secret";

/// Full application wired to a fresh migrated SQLite database.
pub struct TestApp {
    pub state: AppState,
    router: Router,
    // Keeps the database file alive for the duration of the test.
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_dir = TempDir::new().unwrap();
        let url = format!(
            "sqlite://{}/pharmacy-test.db?mode=rwc",
            db_dir.path().display()
        );

        let pool = db::establish_connection(&url).await.unwrap();
        db::run_migrations(&pool).await.unwrap();

        let cfg = AppConfig::new(url, TEST_JWT_SECRET.to_string(), "test".to_string());
        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self {
            state,
            router,
            _db_dir: db_dir,
        }
    }

    /// Send one request through the router. `token` is attached as the auth
    /// cookie when present.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("access_token={token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a preassembled request through the router.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// GET with a raw `name=value` cookie pair, as a browser would replay it.
    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response<Body> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        self.oneshot(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.request(Method::DELETE, uri, token, None).await
    }

    fn token(&self, subject: &TokenSubject) -> String {
        self.state.auth.issue_token(subject).unwrap().token
    }

    /// Insert a customer row directly and return it with a valid token.
    pub async fn seed_customer(&self, email: &str, password: &str) -> (customer::Model, String) {
        let now = Utc::now();
        let model = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            phone: Set(random_phone()),
            password_hash: Set(auth::hash_password(password).unwrap()),
            first_name: Set("Casey".to_string()),
            last_name: Set("Customer".to_string()),
            date_of_birth: Set(NaiveDate::from_ymd_opt(1990, 4, 12)),
            emergency_contact_name: Set("Riley Contact".to_string()),
            emergency_contact_phone: Set(random_phone()),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .unwrap();

        let token = self.token(&TokenSubject {
            id: model.id,
            email: model.email.clone(),
            user_type: UserType::Customer,
            pharmacist_role: None,
            admin_level: None,
        });
        (model, token)
    }

    /// Insert a pharmacist row directly and return it with a valid token.
    pub async fn seed_pharmacist(
        &self,
        email: &str,
        password: &str,
        role: PharmacistRole,
    ) -> (pharmacist::Model, String) {
        let now = Utc::now();
        let model = pharmacist::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            phone: Set(random_phone()),
            password_hash: Set(auth::hash_password(password).unwrap()),
            first_name: Set("Parker".to_string()),
            last_name: Set("Pharmacist".to_string()),
            date_of_birth: Set(None),
            pharmacist_role: Set(role.to_string()),
            license_number: Set(format!("RX-{}", &Uuid::new_v4().simple().to_string()[..8])),
            license_state: Set("CA".to_string()),
            license_expiry_date: Set(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()),
            assigned_by: Set(None),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .unwrap();

        let token = self.token(&TokenSubject {
            id: model.id,
            email: model.email.clone(),
            user_type: UserType::Pharmacist,
            pharmacist_role: Some(role),
            admin_level: None,
        });
        (model, token)
    }

    /// Insert an admin row directly and return it with a valid token.
    pub async fn seed_admin(
        &self,
        email: &str,
        password: &str,
        level: AdminLevel,
    ) -> (admin::Model, String) {
        let now = Utc::now();
        let model = admin::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            phone: Set(random_phone()),
            password_hash: Set(auth::hash_password(password).unwrap()),
            first_name: Set("Avery".to_string()),
            last_name: Set("Admin".to_string()),
            admin_level: Set(level.to_string()),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .unwrap();

        let token = self.token(&TokenSubject {
            id: model.id,
            email: model.email.clone(),
            user_type: UserType::Admin,
            pharmacist_role: None,
            admin_level: Some(level),
        });
        (model, token)
    }

    /// Look up a pharmacist row by email.
    pub async fn find_pharmacist(&self, email: &str) -> pharmacist::Model {
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
        pharmacist::Entity::find()
            .filter(pharmacist::Column::Email.eq(email))
            .one(&*self.state.db)
            .await
            .unwrap()
            .expect("pharmacist row should exist")
    }

    /// Create a brand through the API as the given token; returns its id.
    pub async fn create_brand(&self, token: &str, name: &str) -> i32 {
        let response = self
            .post(
                "/products/brands",
                Some(token),
                serde_json::json!({ "brandName": name }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        body["brandID"].as_i64().unwrap() as i32
    }
}

/// Distinct E.164-looking phone number per call; the phone columns are
/// unique per table.
fn random_phone() -> String {
    let n: u64 = u64::from(Uuid::new_v4().as_fields().0) % 1_000_000_000;
    format!("+1415{n:09}")
}

/// Read the response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` pair from the Set-Cookie header, for replaying in a
/// Cookie header.
pub fn cookie_pair(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub fn set_cookie_header(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap()
}
