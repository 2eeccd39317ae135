//! Product Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type ProductId = Thing;

/// Product model
///
/// `category` 是自由文本标签，不是 Category 表的外键 —
/// 删除 Category 记录不影响商品。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Non-negative; zero means "price not displayed"
    #[serde(default)]
    pub price: f64,
    /// Primary image URL (first of the gallery)
    #[serde(default)]
    pub image: String,
    /// Additional gallery image URLs, ordered
    #[serde(default)]
    pub images: Vec<String>,
    /// Free-text category label
    #[serde(default)]
    pub category: String,
    /// None = stock not tracked, Some(0) = out of stock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Owning catalog (every product belongs to exactly one)
    #[serde(with = "serde_thing")]
    pub catalog_id: Thing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub sku: Option<String>,
}
