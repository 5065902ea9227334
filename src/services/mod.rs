pub mod accounts;
pub mod admin;
pub mod brands;
pub mod products;

use std::sync::Arc;

use crate::db::DbPool;

/// Aggregated services handed to the HTTP handlers through `AppState`.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: accounts::AccountService,
    pub brands: brands::BrandService,
    pub products: products::ProductService,
    pub admin: admin::AdminService,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            accounts: accounts::AccountService::new(db.clone()),
            brands: brands::BrandService::new(db.clone()),
            products: products::ProductService::new(db.clone()),
            admin: admin::AdminService::new(db),
        }
    }
}
