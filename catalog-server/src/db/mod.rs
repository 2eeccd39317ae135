//! Database Module
//!
//! Handles the embedded SurrealDB instance: RocksDB-backed in normal
//! operation, in-memory with fixture data in mock mode.

pub mod models;
pub mod repository;

use crate::core::Config;
use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "catalog";
const DATABASE: &str = "catalog";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database described by the configuration
    ///
    /// 模拟模式：内存引擎 + 固定示例数据，本地开发无需外部存储。
    pub async fn open(config: &Config) -> Result<Self, AppError> {
        if config.mock_data {
            let service = Self::open_in_memory().await?;
            seed_mock_data(&service.db).await?;
            tracing::info!("Mock database seeded with sample catalog 'tienda-ejemplo'");
            return Ok(service);
        }

        let db_path = config.database_dir().join("catalog.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let db = Surreal::new::<RocksDb>(db_path_str.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path_str, "Database connection established (RocksDB)");

        Ok(Self { db })
    }

    /// Open an empty in-memory database (mock mode and tests)
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

/// 写入示例数据 (模拟模式的固定示例目录)
pub async fn seed_mock_data(db: &Surreal<Db>) -> Result<(), AppError> {
    use models::{CatalogCreate, CatalogTheme, CategoryCreate, ClientCreate, ProductCreate};
    use repository::{CatalogRepository, CategoryRepository, ClientRepository, ProductRepository};

    let clients = ClientRepository::new(db.clone());
    let client = clients
        .create(ClientCreate {
            name: "Cliente Ejemplo".into(),
            email: "cliente@example.com".into(),
            phone: None,
            company: Some("WebRiders".into()),
        })
        .await?;
    let client_id = client
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let catalogs = CatalogRepository::new(db.clone());
    let catalog = catalogs
        .create(CatalogCreate {
            name: "Tienda Ejemplo".into(),
            slug: None, // derived: "tienda-ejemplo"
            client_id,
            description: Some("Catálogo de productos de ejemplo".into()),
            logo: None,
            theme: Some(CatalogTheme {
                primary_color: "#0ea5e9".into(),
                secondary_color: "#0369a1".into(),
                font_family: None,
                banner_image: None,
            }),
        })
        .await?;
    let catalog_id = catalog
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let categories = CategoryRepository::new(db.clone());
    for (name, color) in [("Categoría 1", "#0ea5e9"), ("Categoría 2", "#f59e0b")] {
        categories
            .create(
                &catalog_id,
                CategoryCreate {
                    name: name.into(),
                    description: None,
                    color: Some(color.into()),
                },
            )
            .await?;
    }

    let products = ProductRepository::new(db.clone());
    products
        .create(
            &catalog_id,
            ProductCreate {
                name: "Producto 1".into(),
                description: Some("Descripción del producto 1".into()),
                price: Some(99.99),
                image: Some("https://via.placeholder.com/300".into()),
                images: None,
                category: Some("Categoría 1".into()),
                stock: Some(10),
                sku: Some("PROD-001".into()),
            },
        )
        .await?;
    products
        .create(
            &catalog_id,
            ProductCreate {
                name: "Producto 2".into(),
                description: Some("Descripción del producto 2".into()),
                price: Some(149.99),
                image: Some("https://via.placeholder.com/300".into()),
                images: None,
                category: Some("Categoría 2".into()),
                stock: Some(5),
                sku: Some("PROD-002".into()),
            },
        )
        .await?;

    Ok(())
}
