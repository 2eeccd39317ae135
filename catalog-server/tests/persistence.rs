//! 持久化存储测试
//!
//! 非模拟模式：RocksDB 落盘后重新打开，数据仍在。

use catalog_server::Config;
use catalog_server::db::DbService;
use catalog_server::db::models::{CatalogCreate, ClientCreate};
use catalog_server::db::repository::{CatalogRepository, ClientRepository};

#[tokio::test]
async fn catalog_survives_reopen() {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0, false);
    config
        .ensure_work_dir_structure()
        .expect("work dir structure");

    // 首次打开：写入一个客户和一个目录
    {
        let service = DbService::open(&config).await.expect("open db");

        let client = ClientRepository::new(service.db.clone())
            .create(ClientCreate {
                name: "Cliente Persistente".into(),
                email: "persist@example.com".into(),
                phone: None,
                company: None,
            })
            .await
            .expect("create client");

        CatalogRepository::new(service.db.clone())
            .create(CatalogCreate {
                name: "Tienda Persistente".into(),
                slug: None,
                client_id: client.id.as_ref().map(|t| t.to_string()).unwrap(),
                description: None,
                logo: None,
                theme: None,
            })
            .await
            .expect("create catalog");
    } // drop releases the RocksDB lock

    // 重新打开：slug 查询命中同一条记录
    let service = DbService::open(&config).await.expect("reopen db");
    let found = CatalogRepository::new(service.db.clone())
        .find_by_slug("tienda-persistente")
        .await
        .expect("query")
        .expect("catalog persisted");

    assert_eq!(found.name, "Tienda Persistente");
    assert_eq!(found.slug, "tienda-persistente");
}
