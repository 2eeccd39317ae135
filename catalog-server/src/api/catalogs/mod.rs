//! Catalog API 模块

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalogs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Slug lookup (must be before /{id} to avoid path conflicts)
        .route("/by-slug/{slug}", get(handler::get_by_slug))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        // Dashboard summary for one catalog
        .route("/{id}/stats", get(handler::stats))
        // Nested product / category collections
        .route(
            "/{id}/products",
            get(super::products::handler::list_by_catalog).post(super::products::handler::create),
        )
        .route(
            "/{id}/categories",
            get(super::categories::handler::list_by_catalog)
                .post(super::categories::handler::create),
        )
}
