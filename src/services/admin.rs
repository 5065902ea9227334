use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::UserType;
use crate::db::DbPool;
use crate::dto::auth::UserProfile;
use crate::entities::{admin, customer, pharmacist};
use crate::errors::ServiceError;

/// Admin-only user management: listings, admin removal, status toggles.
#[derive(Clone)]
pub struct AdminService {
    db: Arc<DbPool>,
}

impl AdminService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<UserProfile>, u64), ServiceError> {
        let total = customer::Entity::find().count(&*self.db).await?;
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;
        Ok((rows.iter().map(UserProfile::from).collect(), total))
    }

    #[instrument(skip(self))]
    pub async fn list_pharmacists(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<UserProfile>, u64), ServiceError> {
        let total = pharmacist::Entity::find().count(&*self.db).await?;
        let rows = pharmacist::Entity::find()
            .order_by_asc(pharmacist::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;
        Ok((rows.iter().map(UserProfile::from).collect(), total))
    }

    /// Removes an admin account. An admin cannot remove itself.
    #[instrument(skip(self))]
    pub async fn remove_admin(&self, id: Uuid, acting_admin: Uuid) -> Result<(), ServiceError> {
        if id == acting_admin {
            return Err(ServiceError::Forbidden(
                "An admin cannot remove itself".to_string(),
            ));
        }

        let existing = admin::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Admin with id={id} not found")))?;

        admin::Entity::delete_by_id(existing.id)
            .exec(&*self.db)
            .await?;
        info!(admin_id = %id, removed_by = %acting_admin, "admin removed");
        Ok(())
    }

    /// Activates or deactivates an account in any of the three tables.
    #[instrument(skip(self))]
    pub async fn set_user_status(
        &self,
        user_type: UserType,
        id: Uuid,
        is_active: bool,
    ) -> Result<UserProfile, ServiceError> {
        let now = Utc::now();
        let profile = match user_type {
            UserType::Customer => {
                let existing = customer::Entity::find_by_id(id)
                    .one(&*self.db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Customer with id={id} not found"))
                    })?;
                let mut active: customer::ActiveModel = existing.into();
                active.is_active = Set(is_active);
                active.updated_at = Set(now);
                UserProfile::from(&active.update(&*self.db).await?)
            }
            UserType::Pharmacist => {
                let existing = pharmacist::Entity::find_by_id(id)
                    .one(&*self.db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Pharmacist with id={id} not found"))
                    })?;
                let mut active: pharmacist::ActiveModel = existing.into();
                active.is_active = Set(is_active);
                active.updated_at = Set(now);
                UserProfile::from(&active.update(&*self.db).await?)
            }
            UserType::Admin => {
                let existing = admin::Entity::find_by_id(id)
                    .one(&*self.db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Admin with id={id} not found"))
                    })?;
                let mut active: admin::ActiveModel = existing.into();
                active.is_active = Set(is_active);
                active.updated_at = Set(now);
                UserProfile::from(&active.update(&*self.db).await?)
            }
        };

        info!(user_id = %id, user_type = %user_type, is_active, "user status updated");
        Ok(profile)
    }
}
