use std::str::FromStr;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{CurrentUser, UserType};
use crate::dto::auth::{RegisterAdminRequest, UserProfile};
use crate::errors::ServiceError;
use crate::handlers::common::{validate_input, PaginatedResponse, PaginationParams};
use crate::AppState;

/// Dashboard administration. Every handler re-checks the admin claim from
/// the token; there is no unauthenticated path into this router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/pharmacists", get(list_pharmacists))
        .route("/admins", post(add_admin))
        .route("/admins/:id", delete(remove_admin))
        .route("/users/:user_type/:id/status", patch(update_user_status))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStatusRequest {
    pub is_active: bool,
}

/// Paginated customer listing.
#[utoipa::path(
    get,
    path = "/admin/customers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated customer profiles", body = PaginatedResponse<UserProfile>),
        (status = 403, description = "Caller is not an admin", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "admin"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_admin()?;

    let (data, total) = state
        .services
        .admin
        .list_customers(params.per_page, params.offset())
        .await?;
    Ok(Json(PaginatedResponse::new(
        data,
        params.page,
        params.per_page,
        total,
    )))
}

/// Paginated pharmacist listing.
#[utoipa::path(
    get,
    path = "/admin/pharmacists",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated pharmacist profiles", body = PaginatedResponse<UserProfile>),
        (status = 403, description = "Caller is not an admin", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "admin"
)]
pub async fn list_pharmacists(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_admin()?;

    let (data, total) = state
        .services
        .admin
        .list_pharmacists(params.per_page, params.offset())
        .await?;
    Ok(Json(PaginatedResponse::new(
        data,
        params.page,
        params.per_page,
        total,
    )))
}

/// Same payload as `/auth/register/admin`; SUPER admin only.
#[utoipa::path(
    post,
    path = "/admin/admins",
    request_body = RegisterAdminRequest,
    responses(
        (status = 201, description = "Admin registered", body = UserProfile),
        (status = 403, description = "Caller is not a SUPER admin", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email or phone already in use", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "admin"
)]
pub async fn add_admin(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<RegisterAdminRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_super_admin()?;
    validate_input(&req)?;

    let created = state.services.accounts.register_admin(req).await?;
    Ok((StatusCode::CREATED, Json(UserProfile::from(&created))))
}

/// Remove an admin account. SUPER admin only; self-removal is refused.
#[utoipa::path(
    delete,
    path = "/admin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin id")),
    responses(
        (status = 204, description = "Admin removed"),
        (status = 403, description = "Not a SUPER admin, or self-removal", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown admin", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "admin"
)]
pub async fn remove_admin(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_super_admin()?;

    state.services.admin.remove_admin(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Activate or deactivate any account.
/// `user_type` path segment is CUSTOMER, PHARMACIST, or ADMIN.
#[utoipa::path(
    patch,
    path = "/admin/users/{user_type}/{id}/status",
    params(
        ("user_type" = String, Path, description = "CUSTOMER, PHARMACIST, or ADMIN"),
        ("id" = Uuid, Path, description = "Account id")
    ),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Unknown user type", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown account", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "admin"
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((user_type, id)): Path<(String, Uuid)>,
    Json(req): Json<UpdateUserStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_admin()?;

    let user_type = UserType::from_str(&user_type.to_uppercase()).map_err(|_| {
        ServiceError::InvalidInput(format!(
            "Unknown user type '{user_type}'. Use CUSTOMER, PHARMACIST, or ADMIN"
        ))
    })?;

    let profile = state
        .services
        .admin
        .set_user_status(user_type, id, req.is_active)
        .await?;
    Ok(Json(profile))
}
