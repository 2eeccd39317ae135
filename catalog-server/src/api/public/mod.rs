//! 公开目录 API 模块
//!
//! 无需认证的店铺前台接口，挂载在根路径 (历史 URL 兼容)：
//! - `GET /getCatalog?slug=...`
//! - `GET /searchProducts?catalogId=...&query=...&category=...`
//! - `GET /getCatalogStats?catalogId=...`

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/getCatalog", get(handler::get_catalog))
        .route("/searchProducts", get(handler::search_products))
        .route("/getCatalogStats", get(handler::get_catalog_stats))
}
