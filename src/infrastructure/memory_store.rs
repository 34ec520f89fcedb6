//! 内存存储
//!
//! 以插入顺序保存记录，查找/替换/删除都是线性扫描。
//! 每个操作在整个读-改-写期间持有同一把锁。

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::app::catalog::{
    model::Product,
    store::{ProductStore, StoreError},
};

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带种子数据的内存存储
    pub fn seeded() -> Self {
        Self::with_products(Product::seed())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.lock().clone())
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let products = self.products.lock();
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.products.lock();
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::Duplicate(product.id));
        }
        products.push(product.clone());
        Ok(product)
    }

    async fn replace(&self, id: i32, product: Product) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.lock();
        Ok(products.iter_mut().find(|p| p.id == id).map(|existing| {
            existing.overwrite_with(product);
            existing.clone()
        }))
    }

    async fn remove(&self, id: i32) -> Result<bool, StoreError> {
        let mut products = self.products.lock();
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.products.lock().len() as i64)
    }
}
