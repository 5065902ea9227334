use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::dto;
use crate::errors::ErrorResponse;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register_customer,
        handlers::auth::register_pharmacist,
        handlers::auth::register_admin,
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::logout,
        handlers::brands::create_brand,
        handlers::brands::list_brands,
        handlers::brands::get_brand,
        handlers::brands::update_brand,
        handlers::brands::delete_brand,
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::admin::list_customers,
        handlers::admin::list_pharmacists,
        handlers::admin::add_admin,
        handlers::admin::remove_admin,
        handlers::admin::update_user_status,
    ),
    components(schemas(
        dto::auth::RegisterCustomerRequest,
        dto::auth::RegisterPharmacistRequest,
        dto::auth::RegisterAdminRequest,
        dto::auth::LoginRequest,
        dto::auth::LoginResponse,
        dto::auth::UserProfile,
        dto::auth::MessageResponse,
        dto::brands::CreateBrandRequest,
        dto::brands::UpdateBrandRequest,
        dto::brands::BrandResponse,
        dto::products::CreateProductRequest,
        dto::products::UpdateProductRequest,
        dto::products::ProductResponse,
        handlers::admin::UpdateUserStatusRequest,
        handlers::common::PaginationMeta,
        handlers::common::PaginatedResponse<dto::auth::UserProfile>,
        handlers::common::PaginatedResponse<dto::brands::BrandResponse>,
        handlers::common::PaginatedResponse<dto::products::ProductResponse>,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login, and session endpoints"),
        (name = "brands", description = "Brand catalog management"),
        (name = "products", description = "Product catalog and storefront reads"),
        (name = "admin", description = "Dashboard user management"),
    ),
    info(
        title = "Pharmacy API",
        description = "REST backend for the pharmacy e-commerce platform",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("access_token"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"]["/auth/login"].is_object());
        assert!(json["paths"]["/products/brands"].is_object());
    }

    #[test]
    fn admin_surface_is_documented() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"]["/admin/customers"].is_object());
        assert!(json["paths"]["/admin/pharmacists"].is_object());
        assert!(json["paths"]["/admin/admins"].is_object());
        assert!(json["paths"]["/admin/admins/{id}"].is_object());
        assert!(json["paths"]["/admin/users/{user_type}/{id}/status"].is_object());
    }
}
