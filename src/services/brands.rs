use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::dto::brands::{CreateBrandRequest, UpdateBrandRequest};
use crate::entities::brand;
use crate::errors::ServiceError;

/// CRUD over the brands table.
#[derive(Clone)]
pub struct BrandService {
    db: Arc<DbPool>,
}

impl BrandService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, req))]
    pub async fn create_brand(&self, req: CreateBrandRequest) -> Result<brand::Model, ServiceError> {
        let existing = brand::Entity::find()
            .filter(brand::Column::BrandName.eq(req.brand_name.as_str()))
            .count(&*self.db)
            .await?;
        if existing > 0 {
            return Err(ServiceError::Conflict(format!(
                "Brand '{}' already exists",
                req.brand_name
            )));
        }

        let now = Utc::now();
        let model = brand::ActiveModel {
            brand_name: Set(req.brand_name),
            origin_country: Set(req.origin_country),
            manufacturer_name: Set(req.manufacturer_name),
            web_url: Set(req.web_url),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(&*self.db).await?;
        info!(brand_id = created.id, "brand created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: i32) -> Result<brand::Model, ServiceError> {
        brand::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Brand with id={id} not found")))
    }

    #[instrument(skip(self))]
    pub async fn list_brands(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<brand::Model>, u64), ServiceError> {
        let total = brand::Entity::find().count(&*self.db).await?;
        let brands = brand::Entity::find()
            .order_by_asc(brand::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;
        Ok((brands, total))
    }

    #[instrument(skip(self, req))]
    pub async fn update_brand(
        &self,
        id: i32,
        req: UpdateBrandRequest,
    ) -> Result<brand::Model, ServiceError> {
        let existing = self.get_brand(id).await?;

        if let Some(name) = &req.brand_name {
            if *name != existing.brand_name {
                let taken = brand::Entity::find()
                    .filter(brand::Column::BrandName.eq(name.as_str()))
                    .count(&*self.db)
                    .await?;
                if taken > 0 {
                    return Err(ServiceError::Conflict(format!(
                        "Brand '{name}' already exists"
                    )));
                }
            }
        }

        let mut active: brand::ActiveModel = existing.into();
        if let Some(name) = req.brand_name {
            active.brand_name = Set(name);
        }
        if let Some(country) = req.origin_country {
            active.origin_country = Set(Some(country));
        }
        if let Some(manufacturer) = req.manufacturer_name {
            active.manufacturer_name = Set(Some(manufacturer));
        }
        if let Some(url) = req.web_url {
            active.web_url = Set(Some(url));
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        info!(brand_id = updated.id, "brand updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_brand(id).await?;
        brand::Entity::delete_by_id(existing.id)
            .exec(&*self.db)
            .await?;
        info!(brand_id = id, "brand deleted");
        Ok(())
    }
}
