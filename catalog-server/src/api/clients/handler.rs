//! Client API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Catalog, Client, ClientCreate, ClientUpdate};
use crate::db::repository::{CatalogRepository, ClientRepository};
use crate::utils::{AppError, AppResult};

/// GET /api/clients - 获取所有客户
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Client>>> {
    let repo = ClientRepository::new(state.get_db());
    let clients = repo.find_all().await?;
    Ok(Json(clients))
}

/// GET /api/clients/:id - 获取单个客户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Client>> {
    let repo = ClientRepository::new(state.get_db());
    let client = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", id)))?;
    Ok(Json(client))
}

/// POST /api/clients - 创建客户
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Json<Client>> {
    let repo = ClientRepository::new(state.get_db());
    let client = repo.create(payload).await?;
    Ok(Json(client))
}

/// PUT /api/clients/:id - 更新客户
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    let repo = ClientRepository::new(state.get_db());
    let client = repo.update(&id, payload).await?;
    Ok(Json(client))
}

/// DELETE /api/clients/:id - 删除客户
///
/// 目录不级联：客户离场后其目录保留，可转移给其他客户。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ClientRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}

/// GET /api/clients/:id/catalogs - 获取客户名下的目录
pub async fn list_catalogs(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Catalog>>> {
    let repo = CatalogRepository::new(state.get_db());
    let catalogs = repo.find_by_client(&id).await?;
    Ok(Json(catalogs))
}
