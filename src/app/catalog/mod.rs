//! 产品目录应用

pub mod handler;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

pub use handler::AppState;
pub use model::Product;
pub use service::CatalogService;
pub use store::{ProductStore, StoreError};
