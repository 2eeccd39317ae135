//! Catalog Resolver
//!
//! Maps a public slug to its hydrated catalog: the catalog record plus
//! the full product set linked to it. Two independent round trips with
//! no transactional coupling — a product added between the calls may or
//! may not appear (accepted staleness window).

use async_trait::async_trait;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Catalog, Product};
use crate::db::repository::{CatalogRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

/// A catalog hydrated with its product set
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    #[serde(flatten)]
    pub catalog: Catalog,
    pub products: Vec<Product>,
}

/// Seam for the session state container (and its tests)
#[async_trait]
pub trait ResolveCatalog: Send + Sync {
    async fn resolve(&self, slug: &str) -> AppResult<CatalogView>;
}

#[derive(Clone)]
pub struct CatalogResolver {
    catalogs: CatalogRepository,
    products: ProductRepository,
}

impl CatalogResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            catalogs: CatalogRepository::new(db.clone()),
            products: ProductRepository::new(db),
        }
    }

    /// Resolve a slug to its hydrated catalog
    ///
    /// - 空 slug → Invalid (400)
    /// - 无匹配 → NotFound (404)
    pub async fn resolve(&self, slug: &str) -> AppResult<CatalogView> {
        if slug.trim().is_empty() {
            return Err(AppError::invalid("slug is required"));
        }

        let catalog = self
            .catalogs
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Catalog '{}' not found", slug)))?;

        let catalog_id = catalog
            .id
            .as_ref()
            .map(|t| t.to_string())
            .ok_or_else(|| AppError::internal("catalog record missing id"))?;

        let products = self.products.find_by_catalog(&catalog_id).await?;

        tracing::debug!(
            slug = %slug,
            catalog = %catalog.name,
            products = products.len(),
            "Catalog resolved"
        );

        Ok(CatalogView { catalog, products })
    }
}

#[async_trait]
impl ResolveCatalog for CatalogResolver {
    async fn resolve(&self, slug: &str) -> AppResult<CatalogView> {
        CatalogResolver::resolve(self, slug).await
    }
}
