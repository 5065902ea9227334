//! Request/response shapes.
//!
//! Auth payloads keep the snake_case field names of the public API; catalog
//! payloads use the storefront's camelCase convention (`brandName`,
//! `originCountry`, `webURL`, ...), mapped onto snake_case columns.

pub mod auth;
pub mod brands;
pub mod products;
