//! 数据库基础设施

use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Error,
};
use std::time::Duration;
use tracing::info;

use crate::app::catalog::model::Product;

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// 建表并在表为空时写入种子数据，返回本次写入的行数
    pub async fn prepare(&self) -> Result<u64, Error> {
        self.create_tables().await?;
        self.seed_data().await
    }

    async fn create_tables(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                quantity INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("products table ready");
        Ok(())
    }

    // 多个实例同时冷启动时，主键加 ON CONFLICT 保证种子行不会重复。
    async fn seed_data(&self) -> Result<u64, Error> {
        let mut tx = self.pool.begin().await?;

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;

        if count.0 > 0 {
            info!("products table already contains {} rows, skipping seed", count.0);
            return Ok(0);
        }

        let mut inserted = 0;
        for product in Product::seed() {
            let result = sqlx::query(
                r#"
                INSERT INTO products (id, name, description, price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.quantity)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;

        info!("seeded products table with {} rows", inserted);
        Ok(inserted)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
