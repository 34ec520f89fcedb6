//! # 产品目录服务
//!
//! 一个最小的产品 CRUD HTTP 服务：
//! - `app`: 产品模型、存储抽象、业务服务、处理器和路由
//! - `core`: 错误类型、响应结构、请求日志中间件
//! - `infrastructure`: 配置、日志、数据库连接、内存/Postgres 存储实现

pub mod app;
pub mod core;
pub mod infrastructure;

use axum::{
    http::{
        header::{InvalidHeaderValue, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app::catalog::{routes::create_routes, AppState, CatalogService};
use crate::core::middleware::request_logging_middleware;

/// 组装路由、追踪和日志中间件（不含 CORS）
pub fn create_app(catalog: CatalogService) -> Router {
    create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(AppState { catalog })
}

pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]))
}
