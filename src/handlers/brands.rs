use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::{CurrentUser, UserType};
use crate::dto::brands::{BrandResponse, CreateBrandRequest, UpdateBrandRequest};
use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, no_content_response, validate_input, PaginatedResponse, PaginationParams,
};
use crate::AppState;

pub fn brand_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_brand))
        .route("/", get(list_brands))
        .route("/:id", get(get_brand))
        .route("/:id", put(update_brand))
        .route("/:id", delete(delete_brand))
}

/// Create a brand. Admins and lead pharmacists only.
#[utoipa::path(
    post,
    path = "/products/brands",
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 403, description = "Insufficient role", body = crate::errors::ErrorResponse),
        (status = 409, description = "Brand name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "brands"
)]
pub async fn create_brand(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateBrandRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_catalog_manager()?;
    validate_input(&req)?;

    let created = state.services.brands.create_brand(req).await?;
    Ok(created_response(BrandResponse::from(created)))
}

/// List brands. Admins and pharmacists.
#[utoipa::path(
    get,
    path = "/products/brands",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated brand list", body = PaginatedResponse<BrandResponse>)
    ),
    security(("cookie_auth" = [])),
    tag = "brands"
)]
pub async fn list_brands(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_any(&[UserType::Admin, UserType::Pharmacist])?;

    let (brands, total) = state
        .services
        .brands
        .list_brands(params.per_page, params.offset())
        .await?;
    let data = brands.into_iter().map(BrandResponse::from).collect();

    Ok(Json(PaginatedResponse::new(
        data,
        params.page,
        params.per_page,
        total,
    )))
}

/// Fetch a brand by id. Admins and pharmacists.
#[utoipa::path(
    get,
    path = "/products/brands/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand", body = BrandResponse),
        (status = 404, description = "Unknown brand", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "brands"
)]
pub async fn get_brand(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_any(&[UserType::Admin, UserType::Pharmacist])?;

    let brand = state.services.brands.get_brand(id).await?;
    Ok(Json(BrandResponse::from(brand)))
}

/// Update a brand. Admin only.
#[utoipa::path(
    put,
    path = "/products/brands/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Updated brand", body = BrandResponse),
        (status = 404, description = "Unknown brand", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "brands"
)]
pub async fn update_brand(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateBrandRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_admin()?;
    validate_input(&req)?;

    let updated = state.services.brands.update_brand(id, req).await?;
    Ok(Json(BrandResponse::from(updated)))
}

/// Delete a brand. Admin only.
#[utoipa::path(
    delete,
    path = "/products/brands/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 404, description = "Unknown brand", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "brands"
)]
pub async fn delete_brand(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_admin()?;

    state.services.brands.delete_brand(id).await?;
    Ok(no_content_response())
}
