//! 产品数据模型

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
}

impl Product {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// 启动时的四条种子数据 (id 1-4)
    pub fn seed() -> Vec<Product> {
        vec![
            Product::new(1, "Phone", "A smartphone", 699.99, 50),
            Product::new(2, "Laptop", "A powerful laptop", 999.99, 30),
            Product::new(3, "Pen", "A blue ink pen", 1.99, 100),
            Product::new(4, "Table", "A wooden table", 199.99, 20),
        ]
    }

    /// 用 `other` 覆盖除 id 以外的全部字段（整体替换，不做合并）
    pub fn overwrite_with(&mut self, other: Product) {
        self.name = other.name;
        self.description = other.description;
        self.price = other.price;
        self.quantity = other.quantity;
    }
}

/// `PUT /product` 与 `DELETE /product` 的查询参数
#[derive(Debug, Deserialize)]
pub struct ProductIdQuery {
    pub id: i32,
}
