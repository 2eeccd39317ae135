//! Data integrity diagnostics
//!
//! 数据完整性巡检：统计各表的规模，并找出 catalogId 指向已删除
//! 目录的孤儿产品。由 admin 诊断端点按需触发。

use std::collections::HashSet;

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::repository::{CatalogRepository, ClientRepository, ProductRepository, RepoResult};

/// 巡检报告
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub catalogs: usize,
    pub products: usize,
    pub clients: usize,
    /// 孤儿产品 id ("product:xxx")
    pub orphan_products: Vec<String>,
}

/// 执行一次完整巡检
pub async fn run(db: &Surreal<Db>) -> RepoResult<DiagnosticsReport> {
    let catalog_repo = CatalogRepository::new(db.clone());
    let product_repo = ProductRepository::new(db.clone());
    let client_repo = ClientRepository::new(db.clone());

    let catalogs = catalog_repo.find_all().await?;
    let products = product_repo.find_all().await?;
    let clients = client_repo.find_all().await?;

    let live_ids: HashSet<String> = catalogs
        .iter()
        .filter_map(|c| c.id.as_ref().map(|t| t.to_string()))
        .collect();

    let orphans = product_repo.find_orphans(&live_ids).await?;
    let orphan_products: Vec<String> = orphans
        .iter()
        .filter_map(|p| p.id.as_ref().map(|t| t.to_string()))
        .collect();

    if !orphan_products.is_empty() {
        tracing::warn!(
            count = orphan_products.len(),
            "Orphan products detected during diagnostics scan"
        );
    }

    Ok(DiagnosticsReport {
        catalogs: catalogs.len(),
        products: products.len(),
        clients: clients.len(),
        orphan_products,
    })
}
