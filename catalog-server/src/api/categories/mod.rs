//! Category API 模块
//!
//! 分类与产品同构：集合路由嵌套在 `/api/catalogs/{id}/categories`，
//! 单个分类走 `/api/categories/{id}`。

pub(crate) mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/{id}",
        get(handler::get_by_id)
            .put(handler::update)
            .delete(handler::delete),
    )
}
