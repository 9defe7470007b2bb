pub mod auth;
pub mod image_store;
