//! Product Filter Engine
//!
//! Pure, synchronous narrowing of a product set by category and free-text
//! query, plus per-category counts for the filter UI. No I/O, fully
//! deterministic for identical inputs.

use crate::db::models::Product;
use serde::Serialize;
use std::collections::BTreeMap;

/// Synthetic pseudo-category matching every product
pub const ALL_CATEGORIES: &str = "all";

/// Category entry paired with its product count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Searchable text of a product: name, description and category,
/// space-joined and lowercased.
fn search_text(product: &Product) -> String {
    format!(
        "{} {} {}",
        product.name, product.description, product.category
    )
    .to_lowercase()
}

/// Whether a product matches a free-text query (case-insensitive
/// substring containment; the empty query matches everything)
pub fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    search_text(product).contains(&query.to_lowercase())
}

/// Narrow a product set by category and text query
///
/// Category filter first (exact, case-sensitive; [`ALL_CATEGORIES`]
/// disables it), then the text filter. The two compose with logical AND.
pub fn filter(products: &[Product], query: &str, category: &str) -> Vec<Product> {
    let query = query.to_lowercase();
    products
        .iter()
        .filter(|p| category == ALL_CATEGORIES || p.category == category)
        .filter(|p| query.is_empty() || search_text(p).contains(&query))
        .cloned()
        .collect()
}

/// Distinct categories with counts, "all" always offered first
///
/// Categories sort by byte-wise string ordering (not locale-aware).
pub fn category_counts(products: &[Product]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_insert(0) += 1;
    }

    let mut result = Vec::with_capacity(counts.len() + 1);
    result.push(CategoryCount {
        name: ALL_CATEGORIES.to_string(),
        count: products.len(),
    });
    result.extend(counts.into_iter().map(|(name, count)| CategoryCount {
        name: name.to_string(),
        count,
    }));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::sql::Thing;

    fn product(name: &str, description: &str, category: &str) -> Product {
        Product {
            id: None,
            name: name.into(),
            description: description.into(),
            price: 0.0,
            image: String::new(),
            images: Vec::new(),
            category: category.into(),
            stock: None,
            sku: None,
            catalog_id: Thing::from(("catalog", "test")),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("Red Shoe", "Leather", "Footwear"),
            product("Blue Sneaker", "Canvas", "Footwear"),
            product("Wool Sweater", "Warm and cozy", "Apparel"),
        ]
    }

    #[test]
    fn empty_query_all_category_is_identity() {
        let products = sample();
        let filtered = filter(&products, "", ALL_CATEGORIES);
        assert_eq!(filtered.len(), products.len());
        for (a, b) in filtered.iter().zip(products.iter()) {
            assert_eq!(a.name, b.name);
        }
    }

    #[test]
    fn filter_is_idempotent() {
        let products = sample();
        let once = filter(&products, "shoe", ALL_CATEGORIES);
        let twice = filter(&once, "shoe", ALL_CATEGORIES);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn query_matches_substring_of_joined_fields() {
        let p = product("Red Shoe", "Leather", "Footwear");
        // Case-insensitive, substring semantics
        assert!(matches_query(&p, "sho"));
        assert!(matches_query(&p, "LEATHER"));
        assert!(matches_query(&p, "foot"));
        assert!(!matches_query(&p, "boot"));
        // Substring spanning the space join
        assert!(matches_query(&p, "shoe leather"));
    }

    #[test]
    fn category_filter_is_exact_and_case_sensitive() {
        let products = sample();
        let footwear = filter(&products, "", "Footwear");
        assert_eq!(footwear.len(), 2);
        assert!(filter(&products, "", "footwear").is_empty());
    }

    #[test]
    fn filters_compose_with_and() {
        let products = sample();
        let hits = filter(&products, "canvas", "Footwear");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Blue Sneaker");
        // Query matches but category does not
        assert!(filter(&products, "canvas", "Apparel").is_empty());
    }

    #[test]
    fn counts_offer_all_first_then_sorted() {
        let counts = category_counts(&sample());
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    name: "all".into(),
                    count: 3
                },
                CategoryCount {
                    name: "Apparel".into(),
                    count: 1
                },
                CategoryCount {
                    name: "Footwear".into(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn counts_of_empty_set() {
        let counts = category_counts(&[]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].name, "all");
        assert_eq!(counts[0].count, 0);
    }
}
