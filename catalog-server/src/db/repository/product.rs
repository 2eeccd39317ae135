//! Product Repository

use super::{BaseRepository, CatalogRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use std::collections::HashSet;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";
const CATALOG_TABLE: &str = "catalog";

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products (diagnostics)
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find all products belonging to a catalog
    ///
    /// 空结果是合法的空列表，不是错误。
    pub async fn find_by_catalog(&self, catalog_id: &str) -> RepoResult<Vec<Product>> {
        let cat_thing = make_thing(CATALOG_TABLE, catalog_id);
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE catalogId = $catalog ORDER BY name")
            .bind(("catalog", cat_thing.to_string()))
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Create a new product inside a catalog
    ///
    /// 同时刷新所属目录的 updatedAt。
    pub async fn create(&self, catalog_id: &str, data: ProductCreate) -> RepoResult<Product> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("product name cannot be empty".into()));
        }
        if let Some(price) = data.price
            && price < 0.0
        {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }

        let cat_thing = make_thing(CATALOG_TABLE, catalog_id);
        let catalogs = CatalogRepository::new(self.base.db().clone());
        if catalogs.find_by_id(catalog_id).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "Catalog {} not found",
                catalog_id
            )));
        }

        let product = Product {
            id: None,
            name: data.name,
            description: data.description.unwrap_or_default(),
            price: data.price.unwrap_or(0.0),
            image: data.image.unwrap_or_default(),
            images: data.images.unwrap_or_default(),
            category: data.category.unwrap_or_default(),
            stock: data.stock,
            sku: data.sku,
            catalog_id: cat_thing.clone(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))?;

        catalogs.touch(&cat_thing.id.to_raw()).await?;

        Ok(created)
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let thing = make_thing(PRODUCT_TABLE, pure_id);

        if let Some(price) = data.price
            && price < 0.0
        {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = Vec::new();

        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }
        if data.images.is_some() {
            set_parts.push("images = $images");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }
        if data.sku.is_some() {
            set_parts.push("sku = $sku");
        }

        if set_parts.is_empty() {
            // No fields to update
            return self
                .find_by_id(pure_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self.base.db().query(&query_str).bind(("thing", thing));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }
        if let Some(v) = data.images {
            query = query.bind(("images", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.stock {
            query = query.bind(("stock", v));
        }
        if let Some(v) = data.sku {
            query = query.bind(("sku", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;

        let updated = products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        let catalogs = CatalogRepository::new(self.base.db().clone());
        catalogs.touch(&updated.catalog_id.id.to_raw()).await?;

        Ok(updated)
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);

        let result: Option<Product> = self.base.db().delete((PRODUCT_TABLE, pure_id)).await?;
        match result {
            Some(deleted) => {
                let catalogs = CatalogRepository::new(self.base.db().clone());
                catalogs.touch(&deleted.catalog_id.id.to_raw()).await?;
                Ok(())
            }
            None => Err(RepoError::NotFound(format!("Product {} not found", id))),
        }
    }

    /// Find products whose catalogId matches no existing catalog
    ///
    /// Orphans are excluded from every catalog's product set; the
    /// diagnostics endpoint flags them for cleanup.
    pub async fn find_orphans(&self, catalog_ids: &HashSet<String>) -> RepoResult<Vec<Product>> {
        let products = self.find_all().await?;
        Ok(products
            .into_iter()
            .filter(|p| !catalog_ids.contains(&p.catalog_id.to_string()))
            .collect())
    }
}
