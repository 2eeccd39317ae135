//! 数据完整性巡检路由

use axum::{Json, Router, extract::State, routing::get};

use crate::core::ServerState;
use crate::services::{self, DiagnosticsReport};
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/diagnostics", get(run))
}

/// GET /api/diagnostics - 执行一次巡检并返回报告
pub async fn run(State(state): State<ServerState>) -> AppResult<Json<DiagnosticsReport>> {
    let report = services::diagnostics::run(&state.db).await?;
    Ok(Json(report))
}
