//! sea-orm entities for the pharmacy platform.
//!
//! User accounts are partitioned into three role tables (customers,
//! pharmacists, admins); the catalog lives in brands and products.

pub mod admin;
pub mod brand;
pub mod customer;
pub mod pharmacist;
pub mod product;
