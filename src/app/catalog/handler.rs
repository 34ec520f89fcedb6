//! 产品目录处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use super::{
    model::{Product, ProductIdQuery},
    service::CatalogService,
};
use crate::core::{
    error::CoreError,
    response::{HealthResponse, StatusMessage},
};

pub const GREETING: &str = "Welcome to Telusko Trac";

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

pub async fn greet() -> &'static str {
    GREETING
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.catalog.storage_kind();
    match state.catalog.count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse::new("healthy", storage, Some(count))),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("degraded", storage, None)),
        ),
    }
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.catalog.list().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Product>, CoreError> {
    let Path(id) = path?;
    Ok(Json(state.catalog.get(id).await?))
}

/// `POST /products`：返回新建的产品
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let Json(product) = payload?;
    let created = state.catalog.create(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /product`：返回新建后的完整列表
pub async fn create_product_listing(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Product>>), CoreError> {
    let Json(product) = payload?;
    let products = state.catalog.create_and_list(product).await?;
    Ok((StatusCode::CREATED, Json(products)))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let Path(id) = path?;
    let Json(product) = payload?;
    Ok(Json(state.catalog.update(id, product).await?))
}

pub async fn update_product_by_query(
    State(state): State<AppState>,
    query: Result<Query<ProductIdQuery>, QueryRejection>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let Query(ProductIdQuery { id }) = query?;
    let Json(product) = payload?;
    Ok(Json(state.catalog.update(id, product).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<StatusMessage>, CoreError> {
    let Path(id) = path?;
    state.catalog.delete(id).await?;
    Ok(Json(StatusMessage::deleted(id)))
}

pub async fn delete_product_by_query(
    State(state): State<AppState>,
    query: Result<Query<ProductIdQuery>, QueryRejection>,
) -> Result<Json<StatusMessage>, CoreError> {
    let Query(ProductIdQuery { id }) = query?;
    state.catalog.delete(id).await?;
    Ok(Json(StatusMessage::deleted(id)))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::app::catalog::{
        model::Product,
        service::CatalogService,
        store::{ProductStore, StoreError},
    };
    use crate::create_app;

    /// 所有操作都失败的存储
    struct UnavailableStore;

    fn unavailable() -> StoreError {
        StoreError::Database(sqlx::Error::PoolTimedOut)
    }

    #[async_trait]
    impl ProductStore for UnavailableStore {
        fn kind(&self) -> &'static str {
            "postgres"
        }

        async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
            Err(unavailable())
        }

        async fn find(&self, _id: i32) -> Result<Option<Product>, StoreError> {
            Err(unavailable())
        }

        async fn insert(&self, _product: Product) -> Result<Product, StoreError> {
            Err(unavailable())
        }

        async fn replace(&self, _id: i32, _product: Product) -> Result<Option<Product>, StoreError> {
            Err(unavailable())
        }

        async fn remove(&self, _id: i32) -> Result<bool, StoreError> {
            Err(unavailable())
        }

        async fn count(&self) -> Result<i64, StoreError> {
            Err(unavailable())
        }
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let app = create_app(CatalogService::new(Arc::new(UnavailableStore)));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_degraded_when_storage_fails() {
        let (status, body) = get("/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["storage"], "postgres");
        assert!(body["products"].is_null());
    }

    #[tokio::test]
    async fn storage_failure_is_a_generic_500() {
        let (status, body) = get("/products/1").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "STORAGE_ERROR");
        assert_eq!(body["message"], "Storage error");
        assert_eq!(body["code"], 500);
    }
}
