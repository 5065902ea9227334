use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::{CurrentUser, UserType};
use crate::dto::products::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, no_content_response, validate_input, PaginatedResponse, PaginationParams,
};
use crate::AppState;

/// Catalog router. Brand routes nest under `/products/brands`; the
/// storefront reads `/products` without authentication.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .nest("/brands", super::brands::brand_routes())
        .route("/", post(create_product))
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .route("/:id", put(update_product))
        .route("/:id", delete(delete_product))
}

/// Create a product. Admins and lead pharmacists only.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 409, description = "SKU already exists", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_catalog_manager()?;
    validate_input(&req)?;

    let created = state.services.products.create_product(req).await?;
    Ok(created_response(ProductResponse::from(created)))
}

/// Public storefront listing. Staff additionally see inactive rows.
#[utoipa::path(
    get,
    path = "/products",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated product list", body = PaginatedResponse<ProductResponse>)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let include_inactive = user
        .map(|u| matches!(u.user_type, UserType::Admin | UserType::Pharmacist))
        .unwrap_or(false);

    let (products, total) = state
        .services
        .products
        .list_products(params.per_page, params.offset(), include_inactive)
        .await?;
    let data = products.into_iter().map(ProductResponse::from).collect();

    Ok(Json(PaginatedResponse::new(
        data,
        params.page,
        params.per_page,
        total,
    )))
}

/// Fetch a product by id. Public; inactive rows are hidden from
/// unauthenticated callers.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.get_product(id).await?;

    let is_staff = user
        .map(|u| matches!(u.user_type, UserType::Admin | UserType::Pharmacist))
        .unwrap_or(false);
    if !product.is_active && !is_staff {
        return Err(ServiceError::NotFound(format!(
            "Product with id={id} not found"
        )));
    }

    Ok(Json(ProductResponse::from(product)))
}

/// Update a product. Admins and lead pharmacists only.
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_catalog_manager()?;
    validate_input(&req)?;

    let updated = state.services.products.update_product(id, req).await?;
    Ok(Json(ProductResponse::from(updated)))
}

/// Delete a product. Admins and lead pharmacists only.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Insufficient role", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    user.require_catalog_manager()?;

    state.services.products.delete_product(id).await?;
    Ok(no_content_response())
}
