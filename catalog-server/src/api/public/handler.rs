//! Public catalog API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, CatalogResolver, CatalogStats, CatalogView};
use crate::core::ServerState;
use crate::db::models::Product;
use crate::db::repository::{CatalogRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub catalog_id: Option<String>,
    pub query: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub catalog_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
}

/// GET /getCatalog?slug=... - 按 slug 解析目录及其全部产品
pub async fn get_catalog(
    State(state): State<ServerState>,
    Query(params): Query<CatalogQuery>,
) -> AppResult<Json<CatalogView>> {
    let slug = params.slug.unwrap_or_default();
    let resolver = CatalogResolver::new(state.get_db());
    let view = resolver.resolve(&slug).await?;
    Ok(Json(view))
}

/// GET /searchProducts?catalogId=...&query=...&category=... - 过滤产品
pub async fn search_products(
    State(state): State<ServerState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let catalog_id = params
        .catalog_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::invalid("Missing required parameter: catalogId"))?;

    let products = load_catalog_products(&state, &catalog_id).await?;
    let query = params.query.unwrap_or_default();
    let category = params
        .category
        .unwrap_or_else(|| catalog::ALL_CATEGORIES.to_string());

    Ok(Json(SearchResponse {
        products: catalog::filter::filter(&products, &query, &category),
    }))
}

/// GET /getCatalogStats?catalogId=... - 聚合目录统计
pub async fn get_catalog_stats(
    State(state): State<ServerState>,
    Query(params): Query<StatsQuery>,
) -> AppResult<Json<CatalogStats>> {
    let catalog_id = params
        .catalog_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::invalid("Missing required parameter: catalogId"))?;

    let products = load_catalog_products(&state, &catalog_id).await?;
    Ok(Json(catalog::stats::aggregate(&products)))
}

/// 加载目录的产品集，目录不存在时返回 404
async fn load_catalog_products(state: &ServerState, catalog_id: &str) -> AppResult<Vec<Product>> {
    let catalogs = CatalogRepository::new(state.get_db());
    let catalog = catalogs
        .find_by_id(catalog_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Catalog {} not found", catalog_id)))?;

    let id = catalog
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| catalog_id.to_string());

    let products = ProductRepository::new(state.get_db());
    Ok(products.find_by_catalog(&id).await?)
}
