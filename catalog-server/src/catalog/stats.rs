//! Stats Aggregator
//!
//! Pure summary counters over a product set, shared by the admin
//! dashboard and the public stats endpoint.

use crate::db::models::Product;
use serde::Serialize;
use std::collections::BTreeSet;

/// Summary counters for a catalog's product set
///
/// `untracked` 是独立的第三种库存状态：「未记录库存」不并入
/// outOfStock，outOfStock 只统计显式为 0 的商品。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_products: usize,
    /// Sum of prices (absent price counts as 0)
    pub total_value: f64,
    /// Distinct category labels, sorted
    pub categories: Vec<String>,
    /// stock > 0
    pub in_stock: usize,
    /// stock == 0, explicitly
    pub out_of_stock: usize,
    /// stock never set
    pub untracked: usize,
}

/// Aggregate summary counters from a product set
pub fn aggregate(products: &[Product]) -> CatalogStats {
    let mut categories: BTreeSet<&str> = BTreeSet::new();
    let mut total_value = 0.0;
    let mut in_stock = 0;
    let mut out_of_stock = 0;
    let mut untracked = 0;

    for product in products {
        total_value += product.price;
        categories.insert(product.category.as_str());
        match product.stock {
            Some(0) => out_of_stock += 1,
            Some(_) => in_stock += 1,
            None => untracked += 1,
        }
    }

    CatalogStats {
        total_products: products.len(),
        total_value,
        categories: categories.into_iter().map(String::from).collect(),
        in_stock,
        out_of_stock,
        untracked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::sql::Thing;

    fn product(name: &str, price: f64, category: &str, stock: Option<u32>) -> Product {
        Product {
            id: None,
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            images: Vec::new(),
            category: category.into(),
            stock,
            sku: None,
            catalog_id: Thing::from(("catalog", "test")),
        }
    }

    #[test]
    fn empty_set_aggregates_to_zero() {
        let stats = aggregate(&[]);
        assert_eq!(
            stats,
            CatalogStats {
                total_products: 0,
                total_value: 0.0,
                categories: vec![],
                in_stock: 0,
                out_of_stock: 0,
                untracked: 0,
            }
        );
    }

    #[test]
    fn sample_catalog_totals() {
        // tienda-ejemplo fixture: 99.99 + 149.99, both in stock
        let products = vec![
            product("Producto 1", 99.99, "Categoría 1", Some(10)),
            product("Producto 2", 149.99, "Categoría 2", Some(5)),
        ];
        let stats = aggregate(&products);
        assert_eq!(stats.total_products, 2);
        assert!((stats.total_value - 249.98).abs() < 1e-9);
        assert_eq!(stats.in_stock, 2);
        assert_eq!(stats.out_of_stock, 0);
        assert_eq!(stats.untracked, 0);
        assert_eq!(stats.categories, vec!["Categoría 1", "Categoría 2"]);
    }

    #[test]
    fn untracked_is_not_out_of_stock() {
        let products = vec![
            product("a", 1.0, "X", Some(0)),
            product("b", 1.0, "X", None),
            product("c", 1.0, "X", Some(3)),
        ];
        let stats = aggregate(&products);
        assert_eq!(stats.in_stock, 1);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.untracked, 1);
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let products = vec![
            product("a", 0.0, "Zapatos", None),
            product("b", 0.0, "Abrigos", None),
            product("c", 0.0, "Zapatos", None),
        ];
        let stats = aggregate(&products);
        assert_eq!(stats.categories, vec!["Abrigos", "Zapatos"]);
    }
}
