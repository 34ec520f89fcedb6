//! 产品目录路由
//!
//! `/products/:id` 与 `/product` 两种路径形状同时提供。

use axum::{
    routing::{get, post},
    Router,
};

use super::handler::{
    create_product, create_product_listing, delete_product, delete_product_by_query, get_product,
    greet, health_check, list_products, update_product, update_product_by_query, AppState,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(greet))
        .route("/health", get(health_check))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/product/:id", get(get_product))
        .route(
            "/product",
            post(create_product_listing)
                .put(update_product_by_query)
                .delete(delete_product_by_query),
        )
}
