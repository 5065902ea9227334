use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::dto::products::{CreateProductRequest, UpdateProductRequest};
use crate::entities::{brand, product};
use crate::errors::ServiceError;

/// CRUD over the products table.
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, req))]
    pub async fn create_product(
        &self,
        req: CreateProductRequest,
    ) -> Result<product::Model, ServiceError> {
        let sku_taken = product::Entity::find()
            .filter(product::Column::Sku.eq(req.sku.as_str()))
            .count(&*self.db)
            .await?;
        if sku_taken > 0 {
            return Err(ServiceError::Conflict(format!(
                "Product with SKU '{}' already exists",
                req.sku
            )));
        }

        if let Some(brand_id) = req.brand_id {
            self.ensure_brand_exists(brand_id).await?;
        }

        let now = Utc::now();
        let model = product::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            sku: Set(req.sku),
            price: Set(req.price),
            brand_id: Set(req.brand_id),
            requires_prescription: Set(req.requires_prescription),
            stock_quantity: Set(req.stock_quantity),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(&*self.db).await?;
        info!(product_id = created.id, "product created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with id={id} not found")))
    }

    /// Storefront listing. Unauthenticated callers only see active rows.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        limit: u64,
        offset: u64,
        include_inactive: bool,
    ) -> Result<(Vec<product::Model>, u64), ServiceError> {
        let mut query = product::Entity::find();
        if !include_inactive {
            query = query.filter(product::Column::IsActive.eq(true));
        }

        let total = query.clone().count(&*self.db).await?;
        let products = query
            .order_by_asc(product::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;
        Ok((products, total))
    }

    #[instrument(skip(self, req))]
    pub async fn update_product(
        &self,
        id: i32,
        req: UpdateProductRequest,
    ) -> Result<product::Model, ServiceError> {
        let existing = self.get_product(id).await?;

        if let Some(brand_id) = req.brand_id {
            self.ensure_brand_exists(brand_id).await?;
        }

        let mut active: product::ActiveModel = existing.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = req.price {
            active.price = Set(price);
        }
        if let Some(brand_id) = req.brand_id {
            active.brand_id = Set(Some(brand_id));
        }
        if let Some(requires_prescription) = req.requires_prescription {
            active.requires_prescription = Set(requires_prescription);
        }
        if let Some(stock_quantity) = req.stock_quantity {
            active.stock_quantity = Set(stock_quantity);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        info!(product_id = updated.id, "product updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_product(id).await?;
        product::Entity::delete_by_id(existing.id)
            .exec(&*self.db)
            .await?;
        info!(product_id = id, "product deleted");
        Ok(())
    }

    async fn ensure_brand_exists(&self, brand_id: i32) -> Result<(), ServiceError> {
        let exists = brand::Entity::find_by_id(brand_id)
            .count(&*self.db)
            .await?;
        if exists == 0 {
            return Err(ServiceError::InvalidInput(format!(
                "Brand with id={brand_id} does not exist"
            )));
        }
        Ok(())
    }
}
