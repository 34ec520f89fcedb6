//! 产品目录业务服务
//!
//! 同一份实现同时服务内存存储和数据库存储。

use std::sync::Arc;
use tracing::{error, info, warn};

use super::{
    model::Product,
    store::{ProductStore, StoreError},
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn storage_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn list(&self) -> Result<Vec<Product>, CoreError> {
        self.store.list_all().await.map_err(storage_failure)
    }

    pub async fn get(&self, id: i32) -> Result<Product, CoreError> {
        match self.store.find(id).await.map_err(storage_failure)? {
            Some(product) => Ok(product),
            None => {
                warn!("product {} not found", id);
                Err(CoreError::NotFound(id))
            }
        }
    }

    pub async fn create(&self, product: Product) -> Result<Product, CoreError> {
        let id = product.id;
        match self.store.insert(product).await {
            Ok(stored) => {
                info!("created product {} ({})", stored.id, stored.name);
                Ok(stored)
            }
            Err(StoreError::Duplicate(_)) => {
                warn!("product {} already exists", id);
                Err(CoreError::Conflict(id))
            }
            Err(e) => Err(storage_failure(e)),
        }
    }

    /// 创建后返回完整列表（`POST /product` 的响应形状）
    pub async fn create_and_list(&self, product: Product) -> Result<Vec<Product>, CoreError> {
        self.create(product).await?;
        self.list().await
    }

    /// 整体替换除 id 以外的字段，id 以路径/查询参数为准
    pub async fn update(&self, id: i32, product: Product) -> Result<Product, CoreError> {
        match self.store.replace(id, product).await.map_err(storage_failure)? {
            Some(updated) => {
                info!("updated product {}", id);
                Ok(updated)
            }
            None => {
                warn!("update of missing product {}", id);
                Err(CoreError::NotFound(id))
            }
        }
    }

    pub async fn delete(&self, id: i32) -> Result<(), CoreError> {
        if self.store.remove(id).await.map_err(storage_failure)? {
            info!("deleted product {}", id);
            Ok(())
        } else {
            warn!("delete of missing product {}", id);
            Err(CoreError::NotFound(id))
        }
    }

    pub async fn count(&self) -> Result<i64, CoreError> {
        self.store.count().await.map_err(storage_failure)
    }
}

fn storage_failure(err: StoreError) -> CoreError {
    error!("store failure: {}", err);
    CoreError::from(err)
}
