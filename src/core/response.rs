//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 删除等操作的状态响应
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusMessage {
    pub message: String,
    pub id: i32,
}

impl StatusMessage {
    pub fn deleted(id: i32) -> Self {
        Self {
            message: format!("Product with id={} was deleted successfully!", id),
            id,
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub products: Option<i64>,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(status: &str, storage: &str, products: Option<i64>) -> Self {
        Self {
            status: status.to_string(),
            storage: storage.to_string(),
            products,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
