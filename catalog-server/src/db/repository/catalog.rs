//! Catalog Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::catalog::slug::slugify;
use crate::db::models::{Catalog, CatalogCreate, CatalogUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const CATALOG_TABLE: &str = "catalog";

// =============================================================================
// Catalog Repository
// =============================================================================

#[derive(Clone)]
pub struct CatalogRepository {
    base: BaseRepository,
}

impl CatalogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all catalogs (admin dashboard listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Catalog>> {
        let catalogs: Vec<Catalog> = self
            .base
            .db()
            .query("SELECT * FROM catalog ORDER BY name")
            .await?
            .take(0)?;
        Ok(catalogs)
    }

    /// Find one catalog by its public slug (exact, case-sensitive match)
    ///
    /// LIMIT 1: slug 唯一性在写入时强制，读路径只取第一条。
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Catalog>> {
        let catalogs: Vec<Catalog> = self
            .base
            .db()
            .query("SELECT * FROM catalog WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(catalogs.into_iter().next())
    }

    /// Find all catalogs owned by a client
    pub async fn find_by_client(&self, client_id: &str) -> RepoResult<Vec<Catalog>> {
        let catalogs: Vec<Catalog> = self
            .base
            .db()
            .query("SELECT * FROM catalog WHERE clientId = $client ORDER BY name")
            .bind(("client", client_id.to_string()))
            .await?
            .take(0)?;
        Ok(catalogs)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Catalog>> {
        let pure_id = strip_table_prefix(CATALOG_TABLE, id);
        let catalog: Option<Catalog> = self.base.db().select((CATALOG_TABLE, pure_id)).await?;
        Ok(catalog)
    }

    /// Check whether a slug is already taken by another catalog
    async fn slug_taken(&self, slug: &str, exclude: Option<&Thing>) -> RepoResult<bool> {
        #[derive(serde::Deserialize)]
        struct Found {
            #[allow(dead_code)]
            slug: String,
        }

        let mut query = if let Some(exclude) = exclude {
            self.base
                .db()
                .query("SELECT slug FROM catalog WHERE slug = $slug AND id != $exclude LIMIT 1")
                .bind(("slug", slug.to_string()))
                .bind(("exclude", exclude.clone()))
        } else {
            self.base
                .db()
                .query("SELECT slug FROM catalog WHERE slug = $slug LIMIT 1")
                .bind(("slug", slug.to_string()))
        }
        .await?;

        let found: Vec<Found> = query.take(0)?;
        Ok(!found.is_empty())
    }

    /// Create a new catalog
    ///
    /// slug 省略时从名称派生；无论来源都归一化后检查唯一性，
    /// 重复时拒绝写入 (Duplicate) 而不是留给读路径容忍。
    pub async fn create(&self, data: CatalogCreate) -> RepoResult<Catalog> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("catalog name cannot be empty".into()));
        }

        let slug = match &data.slug {
            Some(s) if !s.trim().is_empty() => slugify(s),
            _ => slugify(&data.name),
        };
        if slug.is_empty() {
            return Err(RepoError::Validation(format!(
                "cannot derive a slug from '{}'",
                data.name
            )));
        }
        if self.slug_taken(&slug, None).await? {
            return Err(RepoError::Duplicate(format!("slug '{}' already in use", slug)));
        }

        let now = Utc::now();
        let catalog = Catalog {
            id: None,
            name: data.name,
            slug,
            client_id: data.client_id,
            description: data.description.unwrap_or_default(),
            logo: data.logo,
            theme: data.theme,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Catalog> = self
            .base
            .db()
            .create(CATALOG_TABLE)
            .content(catalog)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create catalog".to_string()))
    }

    /// Update a catalog (partial; always refreshes updatedAt)
    pub async fn update(&self, id: &str, data: CatalogUpdate) -> RepoResult<Catalog> {
        let pure_id = strip_table_prefix(CATALOG_TABLE, id);
        let thing = make_thing(CATALOG_TABLE, pure_id);

        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(RepoError::Validation("catalog name cannot be empty".into()));
        }

        // Normalize + uniqueness check when the slug changes
        let slug = match &data.slug {
            Some(s) => {
                let slug = slugify(s);
                if slug.is_empty() {
                    return Err(RepoError::Validation("slug cannot be empty".into()));
                }
                if self.slug_taken(&slug, Some(&thing)).await? {
                    return Err(RepoError::Duplicate(format!(
                        "slug '{}' already in use",
                        slug
                    )));
                }
                Some(slug)
            }
            None => None,
        };

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = vec!["updatedAt = $updated_at"];

        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if slug.is_some() {
            set_parts.push("slug = $slug");
        }
        if data.client_id.is_some() {
            set_parts.push("clientId = $client_id");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.logo.is_some() {
            set_parts.push("logo = $logo");
        }
        if data.theme.is_some() {
            set_parts.push("theme = $theme");
        }

        let query_str = format!(
            "UPDATE $thing SET {} RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("thing", thing))
            .bind(("updated_at", Utc::now()));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = slug {
            query = query.bind(("slug", v));
        }
        if let Some(v) = data.client_id {
            query = query.bind(("client_id", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.logo {
            query = query.bind(("logo", v));
        }
        if let Some(v) = data.theme {
            query = query.bind(("theme", v));
        }

        let mut result = query.await?;
        let catalogs: Vec<Catalog> = result.take(0)?;

        catalogs
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Catalog {} not found", id)))
    }

    /// Refresh a catalog's updatedAt (called when its products change)
    pub async fn touch(&self, id: &str) -> RepoResult<()> {
        let thing = make_thing(CATALOG_TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing SET updatedAt = $updated_at")
            .bind(("thing", thing))
            .bind(("updated_at", Utc::now()))
            .await?;
        Ok(())
    }

    /// Hard delete a catalog and cascade-delete its products
    ///
    /// Ownership is for deletion purposes only: products live in their own
    /// flat collection, linked by catalogId.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(CATALOG_TABLE, id);
        let thing = make_thing(CATALOG_TABLE, pure_id);

        // Cascade: products first, then the catalog record itself.
        // Category records are intentionally left alone (labels, not owned data).
        self.base
            .db()
            .query("DELETE product WHERE catalogId = $catalog")
            .bind(("catalog", thing.to_string()))
            .await?;

        let result: Option<Catalog> = self.base.db().delete((CATALOG_TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Catalog {} not found", id)));
        }
        Ok(())
    }
}
