//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CATEGORY_TABLE: &str = "category";
const CATALOG_TABLE: &str = "catalog";

// =============================================================================
// Category Repository
// =============================================================================

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories defined for a catalog
    pub async fn find_by_catalog(&self, catalog_id: &str) -> RepoResult<Vec<Category>> {
        let cat_thing = make_thing(CATALOG_TABLE, catalog_id);
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE catalogId = $catalog ORDER BY name")
            .bind(("catalog", cat_thing.to_string()))
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let pure_id = strip_table_prefix(CATEGORY_TABLE, id);
        let category: Option<Category> = self.base.db().select((CATEGORY_TABLE, pure_id)).await?;
        Ok(category)
    }

    /// Create a category label inside a catalog
    pub async fn create(&self, catalog_id: &str, data: CategoryCreate) -> RepoResult<Category> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("category name cannot be empty".into()));
        }

        let now = Utc::now();
        let category = Category {
            id: None,
            name: data.name,
            description: data.description,
            color: data.color,
            catalog_id: make_thing(CATALOG_TABLE, catalog_id),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Category> = self
            .base
            .db()
            .create(CATEGORY_TABLE)
            .content(category)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let pure_id = strip_table_prefix(CATEGORY_TABLE, id);
        let thing = make_thing(CATEGORY_TABLE, pure_id);

        let mut set_parts: Vec<&str> = vec!["updatedAt = $updated_at"];

        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.color.is_some() {
            set_parts.push("color = $color");
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("thing", thing))
            .bind(("updated_at", Utc::now()));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.color {
            query = query.bind(("color", v));
        }

        let mut result = query.await?;
        let categories: Vec<Category> = result.take(0)?;

        categories
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category
    ///
    /// 不级联到商品：商品的 category 字段保留纯文本标签。
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(CATEGORY_TABLE, id);
        let result: Option<Category> = self.base.db().delete((CATEGORY_TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
