//! 产品存储抽象
//!
//! 内存实现见 `infrastructure::memory_store`，Postgres 实现见 `infrastructure::pg_store`。

use async_trait::async_trait;
use thiserror::Error;

use super::model::Product;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product with id={0} already exists")]
    Duplicate(i32),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 两种存储后端共同的能力集合
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 存储后端名称，用于日志和健康检查
    fn kind(&self) -> &'static str;

    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// id 已存在时返回 `StoreError::Duplicate`
    async fn insert(&self, product: Product) -> Result<Product, StoreError>;

    /// 找不到时返回 `Ok(None)`，存储保持不变
    async fn replace(&self, id: i32, product: Product) -> Result<Option<Product>, StoreError>;

    /// 返回是否真的删除了一条记录
    async fn remove(&self, id: i32) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
