//! Catalog API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, CatalogStats, CategoryCount};
use crate::core::ServerState;
use crate::db::models::{Catalog, CatalogCreate, CatalogUpdate};
use crate::db::repository::{CatalogRepository, ProductRepository};
use crate::services::hooks::CatalogEventKind;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 可选：只返回某个客户的目录
    pub client_id: Option<String>,
}

/// 目录统计响应：聚合指标 + 分类计数 (仪表盘用)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatsResponse {
    #[serde(flatten)]
    pub stats: CatalogStats,
    pub category_counts: Vec<CategoryCount>,
}

/// GET /api/catalogs - 获取所有目录 (可按客户过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<Catalog>>> {
    let repo = CatalogRepository::new(state.get_db());
    let catalogs = match params.client_id {
        Some(client_id) => repo.find_by_client(&client_id).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(catalogs))
}

/// GET /api/catalogs/:id - 获取单个目录
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Catalog>> {
    let repo = CatalogRepository::new(state.get_db());
    let catalog = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Catalog {} not found", id)))?;
    Ok(Json(catalog))
}

/// GET /api/catalogs/by-slug/:slug - 按 slug 获取目录
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Catalog>> {
    let repo = CatalogRepository::new(state.get_db());
    let catalog = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Catalog '{}' not found", slug)))?;
    Ok(Json(catalog))
}

/// POST /api/catalogs - 创建目录
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CatalogCreate>,
) -> AppResult<Json<Catalog>> {
    let repo = CatalogRepository::new(state.get_db());
    let catalog = repo.create(payload).await?;

    if let Some(id) = catalog.id.as_ref() {
        state.publish_catalog_event(CatalogEventKind::Created, &id.to_string(), &catalog.name);
    }

    Ok(Json(catalog))
}

/// PUT /api/catalogs/:id - 更新目录
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CatalogUpdate>,
) -> AppResult<Json<Catalog>> {
    let repo = CatalogRepository::new(state.get_db());
    let catalog = repo.update(&id, payload).await?;

    state.publish_catalog_event(CatalogEventKind::Updated, &id, &catalog.name);

    Ok(Json(catalog))
}

/// DELETE /api/catalogs/:id - 删除目录 (级联删除其产品)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CatalogRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}

/// GET /api/catalogs/:id/stats - 目录仪表盘统计
pub async fn stats(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CatalogStatsResponse>> {
    let catalogs = CatalogRepository::new(state.get_db());
    let catalog = catalogs
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Catalog {} not found", id)))?;

    let catalog_id = catalog
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| id.clone());

    let products = ProductRepository::new(state.get_db())
        .find_by_catalog(&catalog_id)
        .await?;

    Ok(Json(CatalogStatsResponse {
        stats: catalog::stats::aggregate(&products),
        category_counts: catalog::filter::category_counts(&products),
    }))
}
