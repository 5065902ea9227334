use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::brand;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandRequest {
    #[validate(length(min = 1, max = 255, message = "Brand name is required"))]
    pub brand_name: String,

    #[validate(length(max = 100))]
    pub origin_country: Option<String>,

    #[validate(length(max = 255))]
    pub manufacturer_name: Option<String>,

    #[serde(rename = "webURL")]
    #[validate(url(message = "webURL must be a valid URL"))]
    pub web_url: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandRequest {
    #[validate(length(min = 1, max = 255))]
    pub brand_name: Option<String>,

    #[validate(length(max = 100))]
    pub origin_country: Option<String>,

    #[validate(length(max = 255))]
    pub manufacturer_name: Option<String>,

    #[serde(rename = "webURL")]
    #[validate(url(message = "webURL must be a valid URL"))]
    pub web_url: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    #[serde(rename = "brandID")]
    pub brand_id: i32,
    pub brand_name: String,
    pub origin_country: Option<String>,
    pub manufacturer_name: Option<String>,
    #[serde(rename = "webURL")]
    pub web_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<brand::Model> for BrandResponse {
    fn from(m: brand::Model) -> Self {
        Self {
            brand_id: m.id,
            brand_name: m.brand_name,
            origin_country: m.origin_country,
            manufacturer_name: m.manufacturer_name,
            web_url: m.web_url,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
