pub mod admin;
pub mod auth;
pub mod brands;
pub mod common;
pub mod health;
pub mod products;
