use axum::{
    extract::{Json, State},
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::auth::CurrentUser;
use crate::dto::auth::{
    LoginRequest, LoginResponse, MessageResponse, RegisterAdminRequest, RegisterCustomerRequest,
    RegisterPharmacistRequest, UserProfile,
};
use crate::errors::ServiceError;
use crate::handlers::common::validate_input;
use crate::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/customer", post(register_customer))
        .route("/register/pharmacist", post(register_pharmacist))
        .route("/register/admin", post(register_admin))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", get(logout))
}

/// Register a customer account and log it in.
#[utoipa::path(
    post,
    path = "/auth/register/customer",
    request_body = RegisterCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = LoginResponse),
        (status = 409, description = "Email or phone already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register_customer(
    State(state): State<AppState>,
    Json(req): Json<RegisterCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&req)?;

    let created = state.services.accounts.register_customer(req).await?;
    let profile = UserProfile::from(&created);
    let subject = crate::services::accounts::Account::Customer(created).token_subject();
    let issued = state.auth.issue_token(&subject)?;

    let body = LoginResponse {
        user: profile,
        access_token: issued.token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    };

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, state.auth.auth_cookie(&issued.token))],
        Json(body),
    ))
}

/// Register a pharmacist. Admin only; the acting admin is recorded as
/// `assigned_by`.
#[utoipa::path(
    post,
    path = "/auth/register/pharmacist",
    request_body = RegisterPharmacistRequest,
    responses(
        (status = 201, description = "Pharmacist registered", body = UserProfile),
        (status = 403, description = "Caller is not an admin", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "auth"
)]
pub async fn register_pharmacist(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<RegisterPharmacistRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_admin()?;
    validate_input(&req)?;

    let created = state
        .services
        .accounts
        .register_pharmacist(req, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(UserProfile::from(&created))))
}

/// Register an admin. SUPER admin only.
#[utoipa::path(
    post,
    path = "/auth/register/admin",
    request_body = RegisterAdminRequest,
    responses(
        (status = 201, description = "Admin registered", body = UserProfile),
        (status = 403, description = "Caller is not a SUPER admin", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "auth"
)]
pub async fn register_admin(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<RegisterAdminRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_super_admin()?;
    validate_input(&req)?;

    let created = state.services.accounts.register_admin(req).await?;
    Ok((StatusCode::CREATED, Json(UserProfile::from(&created))))
}

/// Password login across the three role tables.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&req)?;

    let account = state.services.accounts.login(req).await?;
    let issued = state.auth.issue_token(&account.token_subject())?;

    info!(user_id = %account.id(), "issuing access token");

    let body = LoginResponse {
        user: account.profile(),
        access_token: issued.token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    };

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, state.auth.auth_cookie(&issued.token))],
        Json(body),
    ))
}

/// Current caller's profile, reloaded from its role table.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Caller profile", body = UserProfile),
        (status = 401, description = "Not authenticated", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ServiceError> {
    let account = state
        .services
        .accounts
        .load_account(user.user_type, user.id)
        .await?;
    Ok(Json(account.profile()))
}

/// Stateless logout: expires the auth cookie.
#[utoipa::path(
    get,
    path = "/auth/logout",
    responses((status = 200, description = "Logged out", body = MessageResponse)),
    tag = "auth"
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(SET_COOKIE, state.auth.clear_cookie())],
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
