//! Database Models

// Serde helpers
pub mod serde_thing;

// Catalog Domain
pub mod catalog;
pub mod category;
pub mod product;

// Tenancy
pub mod client;

// Re-exports
pub use catalog::{Catalog, CatalogCreate, CatalogId, CatalogTheme, CatalogUpdate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use client::{Client, ClientCreate, ClientStatus, ClientUpdate};
pub use product::{Product, ProductCreate, ProductUpdate};
