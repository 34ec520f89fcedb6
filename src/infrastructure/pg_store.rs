//! Postgres 存储
//!
//! 每个操作都是一个独立的事务 (unit-of-work)：成功时提交，
//! 任何提前返回都会丢弃 `Transaction`，由 sqlx 回滚并把连接还给连接池。

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use crate::app::catalog::{
    model::Product,
    store::{ProductStore, StoreError},
};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error, id: i32) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Duplicate(id);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl ProductStore for PgProductStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity FROM products ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(products)
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut tx = self.pool.begin().await?;
        let stored = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, description, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, quantity
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, product.id))?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn replace(&self, id: i32, product: Product) -> Result<Option<Product>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, quantity = $4
            WHERE id = $5
            RETURNING id, name, description, price, quantity
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn remove(&self, id: i32) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
