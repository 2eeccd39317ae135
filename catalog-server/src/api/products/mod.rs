//! Product API 模块
//!
//! 产品总是挂在某个目录下：集合路由 (list/create) 嵌套在
//! `/api/catalogs/{id}/products`，单品路由走 `/api/products/{id}`。

pub(crate) mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/{id}",
        get(handler::get_by_id)
            .put(handler::update)
            .delete(handler::delete),
    )
}
