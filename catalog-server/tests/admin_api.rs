//! 管理端 API 集成测试
//!
//! 覆盖目录/产品/分类/客户的 CRUD、slug 冲突、级联删除和巡检接口。

use axum::Router;
use axum::body::Body;
use catalog_server::db::models::Catalog;
use catalog_server::db::repository::strip_table_prefix;
use catalog_server::routes::{self, OneshotRouter};
use catalog_server::{Config, ServerState};
use http::{Method, Request, StatusCode};
use serde_json::{Value, json};

async fn setup() -> (ServerState, Router<ServerState>) {
    let config = Config::with_overrides("/tmp/catalog-test", 0, true);
    let state = ServerState::initialize(&config).await;
    let router = routes::build_app(&state);
    (state, router)
}

async fn call(
    router: &mut Router<ServerState>,
    state: &ServerState,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json_body) => {
            builder = builder.header("content-type", "application/json");
            builder
                .body(Body::from(serde_json::to_vec(&json_body).unwrap()))
                .expect("request")
        }
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.oneshot(state, request).await.expect("oneshot");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

async fn get(r: &mut Router<ServerState>, s: &ServerState, uri: &str) -> (StatusCode, Value) {
    call(r, s, Method::GET, uri, None).await
}

/// 创建测试客户，返回 id
async fn create_client(router: &mut Router<ServerState>, state: &ServerState) -> String {
    let (status, body) = call(
        router,
        state,
        Method::POST,
        "/api/clients",
        Some(json!({
            "name": "Cliente Test",
            "email": "test@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().expect("client id").to_string()
}

#[tokio::test]
async fn catalog_crud_roundtrip() {
    let (state, mut router) = setup().await;
    let client_id = create_client(&mut router, &state).await;

    // Create - slug 从名称派生
    let (status, created) = call(
        &mut router,
        &state,
        Method::POST,
        "/api/catalogs",
        Some(json!({
            "name": "Botas El Paso",
            "clientId": client_id,
            "description": "Botas artesanales"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["slug"], "botas-el-paso");
    let id = created["id"].as_str().unwrap().to_string();

    // Read by id / by slug
    let (status, fetched) = get(&mut router, &state, &format!("/api/catalogs/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Botas El Paso");

    let (status, by_slug) = get(&mut router, &state, "/api/catalogs/by-slug/botas-el-paso").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["id"], created["id"]);

    // Update - 只改描述，slug 不变
    let (status, updated) = call(
        &mut router,
        &state,
        Method::PUT,
        &format!("/api/catalogs/{}", id),
        Some(json!({ "description": "Botas de cuero" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Botas de cuero");
    assert_eq!(updated["slug"], "botas-el-paso");

    // Delete → 后续读取 404
    let (status, _) = call(
        &mut router,
        &state,
        Method::DELETE,
        &format!("/api/catalogs/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&mut router, &state, &format!("/api/catalogs/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_slug_is_conflict() {
    let (state, mut router) = setup().await;
    let client_id = create_client(&mut router, &state).await;

    // 种子数据已占用 "tienda-ejemplo"
    let (status, body) = call(
        &mut router,
        &state,
        Method::POST,
        "/api/catalogs",
        Some(json!({
            "name": "Tienda Ejemplo",
            "clientId": client_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    // 显式 slug 撞车同样拒绝
    let (status, _) = call(
        &mut router,
        &state,
        Method::POST,
        "/api/catalogs",
        Some(json!({
            "name": "Otra Tienda",
            "slug": "tienda-ejemplo",
            "clientId": client_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn catalog_update_rejects_empty_name() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    let (status, _) = call(
        &mut router,
        &state,
        Method::PUT,
        &format!("/api/catalogs/{}", catalog_id),
        Some(json!({ "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 记录保持不变
    let (_, fetched) = get(&mut router, &state, &format!("/api/catalogs/{}", catalog_id)).await;
    assert_eq!(fetched["name"], "Tienda Ejemplo");
}

async fn seeded_catalog_id(router: &mut Router<ServerState>, state: &ServerState) -> String {
    let (status, body) = get(router, state, "/api/catalogs/by-slug/tienda-ejemplo").await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().expect("catalog id").to_string()
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    // Create
    let (status, created) = call(
        &mut router,
        &state,
        Method::POST,
        &format!("/api/catalogs/{}/products", catalog_id),
        Some(json!({
            "name": "Producto 3",
            "price": 19.5,
            "category": "Categoría 1",
            "stock": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["catalogId"].as_str().unwrap(), catalog_id);

    // 目录产品列表包含新产品
    let (_, products) = get(
        &mut router,
        &state,
        &format!("/api/catalogs/{}/products", catalog_id),
    )
    .await;
    assert_eq!(products.as_array().unwrap().len(), 3);

    // Update
    let (status, updated) = call(
        &mut router,
        &state,
        Method::PUT,
        &format!("/api/products/{}", id),
        Some(json!({ "price": 24.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"].as_f64().unwrap(), 24.0);
    // stock=0 表示缺货，不等于未跟踪
    assert_eq!(updated["stock"], 0);

    // Delete
    let (status, _) = call(
        &mut router,
        &state,
        Method::DELETE,
        &format!("/api/products/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&mut router, &state, &format!("/api/products/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_create_rejects_bad_input() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    // 负价格
    let (status, _) = call(
        &mut router,
        &state,
        Method::POST,
        &format!("/api/catalogs/{}/products", catalog_id),
        Some(json!({ "name": "Gratis", "price": -1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 目录不存在
    let (status, _) = call(
        &mut router,
        &state,
        Method::POST,
        "/api/catalogs/catalog:missing/products",
        Some(json!({ "name": "Huerfano", "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_catalog_cascades_products() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    let (_, products) = get(
        &mut router,
        &state,
        &format!("/api/catalogs/{}/products", catalog_id),
    )
    .await;
    let product_id = products.as_array().unwrap()[0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = call(
        &mut router,
        &state,
        Method::DELETE,
        &format!("/api/catalogs/{}", catalog_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 产品随目录一起删除
    let (status, _) = get(&mut router, &state, &format!("/api/products/{}", product_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 巡检确认没有孤儿产品残留
    let (status, report) = get(&mut router, &state, "/api/diagnostics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["orphanProducts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn diagnostics_flags_orphaned_products() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    let (_, products) = get(
        &mut router,
        &state,
        &format!("/api/catalogs/{}/products", catalog_id),
    )
    .await;
    let product_id = products.as_array().unwrap()[0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // 绕过级联删除，直接移除目录记录，留下孤儿产品
    let pure_id = strip_table_prefix("catalog", &catalog_id).to_string();
    let _: Option<Catalog> = state
        .get_db()
        .delete(("catalog", pure_id.as_str()))
        .await
        .expect("raw catalog delete");

    let (status, report) = get(&mut router, &state, "/api/diagnostics").await;
    assert_eq!(status, StatusCode::OK);

    let orphans = report["orphanProducts"].as_array().unwrap();
    assert_eq!(orphans.len(), 2);
    assert!(
        orphans
            .iter()
            .any(|o| o.as_str() == Some(product_id.as_str()))
    );
}

#[tokio::test]
async fn category_crud_roundtrip() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    let (status, created) = call(
        &mut router,
        &state,
        Method::POST,
        &format!("/api/catalogs/{}/categories", catalog_id),
        Some(json!({ "name": "Ofertas", "color": "#ef4444" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();

    let (_, categories) = get(
        &mut router,
        &state,
        &format!("/api/catalogs/{}/categories", catalog_id),
    )
    .await;
    assert_eq!(categories.as_array().unwrap().len(), 3);

    let (status, updated) = call(
        &mut router,
        &state,
        Method::PUT,
        &format!("/api/categories/{}", id),
        Some(json!({ "name": "Rebajas" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Rebajas");

    let (status, _) = call(
        &mut router,
        &state,
        Method::DELETE,
        &format!("/api/categories/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn catalog_stats_endpoint_includes_category_counts() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    let (status, body) = get(
        &mut router,
        &state,
        &format!("/api/catalogs/{}/stats", catalog_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProducts"], 2);

    let counts = body["categoryCounts"].as_array().unwrap();
    // "all" 哨兵排在最前，计数为总数
    assert_eq!(counts[0]["name"], "all");
    assert_eq!(counts[0]["count"], 2);
}

#[tokio::test]
async fn client_listing_and_catalog_ownership() {
    let (state, mut router) = setup().await;

    let (status, clients) = get(&mut router, &state, "/api/clients").await;
    assert_eq!(status, StatusCode::OK);
    let seeded = clients.as_array().unwrap();
    assert_eq!(seeded.len(), 1);
    let client_id = seeded[0]["id"].as_str().unwrap().to_string();

    let (status, catalogs) = get(
        &mut router,
        &state,
        &format!("/api/clients/{}/catalogs", client_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalogs.as_array().unwrap().len(), 1);
    assert_eq!(catalogs.as_array().unwrap()[0]["slug"], "tienda-ejemplo");
}
