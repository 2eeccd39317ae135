//! 公开目录 API 集成测试
//!
//! 使用 MOCK_DATA 模式 (内存库 + 示例目录) 和 oneshot 路由调用，
//! 覆盖完整的中间件 + 处理器链路。

use axum::Router;
use axum::body::Body;
use catalog_server::routes::{self, OneshotRouter};
use catalog_server::{Config, ServerState};
use http::{Request, StatusCode};
use serde_json::Value;

async fn setup() -> (ServerState, Router<ServerState>) {
    let config = Config::with_overrides("/tmp/catalog-test", 0, true);
    let state = ServerState::initialize(&config).await;
    let router = routes::build_app(&state);
    (state, router)
}

async fn get_json(
    router: &mut Router<ServerState>,
    state: &ServerState,
    uri: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
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

#[tokio::test]
async fn health_reports_healthy() {
    let (state, mut router) = setup().await;
    let (status, body) = get_json(&mut router, &state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn detailed_health_reports_database_and_uptime() {
    let (state, mut router) = setup().await;
    let (status, body) = get_json(&mut router, &state, "/health/detailed").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    // 启动时刻在路由组装时固定，首次探测即有可用的 uptime
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn get_catalog_by_slug_returns_catalog_with_products() {
    let (state, mut router) = setup().await;
    let (status, body) = get_json(&mut router, &state, "/getCatalog?slug=tienda-ejemplo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tienda Ejemplo");
    assert_eq!(body["slug"], "tienda-ejemplo");

    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 2);
    // 每个产品都带着所属目录的 id
    let catalog_id = body["id"].as_str().expect("catalog id");
    for product in products {
        assert_eq!(product["catalogId"].as_str().unwrap(), catalog_id);
    }
}

#[tokio::test]
async fn get_catalog_without_slug_is_bad_request() {
    let (state, mut router) = setup().await;

    // 缺少参数和空参数都算无效
    let (status, body) = get_json(&mut router, &state, "/getCatalog").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = get_json(&mut router, &state, "/getCatalog?slug=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&mut router, &state, "/getCatalog?slug=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_catalog_unknown_slug_is_not_found() {
    let (state, mut router) = setup().await;
    let (status, body) = get_json(&mut router, &state, "/getCatalog?slug=nonexistent-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("nonexistent-slug"));
}

async fn seeded_catalog_id(router: &mut Router<ServerState>, state: &ServerState) -> String {
    let (status, body) = get_json(router, state, "/getCatalog?slug=tienda-ejemplo").await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().expect("catalog id").to_string()
}

#[tokio::test]
async fn search_products_filters_by_query() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    // 无过滤 → 全部产品
    let uri = format!("/searchProducts?catalogId={}", catalog_id);
    let (status, body) = get_json(&mut router, &state, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);

    // 子串匹配不区分大小写
    let uri = format!("/searchProducts?catalogId={}&query=PRODUCTO%201", catalog_id);
    let (_, body) = get_json(&mut router, &state, &uri).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Producto 1");

    // 描述字段也参与匹配
    let uri = format!(
        "/searchProducts?catalogId={}&query=descripci%C3%B3n",
        catalog_id
    );
    let (_, body) = get_json(&mut router, &state, &uri).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);

    // 无匹配 → 空集
    let uri = format!("/searchProducts?catalogId={}&query=zapatos", catalog_id);
    let (status, body) = get_json(&mut router, &state, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_products_filters_by_category() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    // "Categoría 2" percent-encoded
    let uri = format!(
        "/searchProducts?catalogId={}&category=Categor%C3%ADa%202",
        catalog_id
    );
    let (status, body) = get_json(&mut router, &state, &uri).await;
    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Producto 2");

    // "all" 哨兵值 → 不过滤
    let uri = format!("/searchProducts?catalogId={}&category=all", catalog_id);
    let (_, body) = get_json(&mut router, &state, &uri).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_products_requires_catalog_id() {
    let (state, mut router) = setup().await;

    let (status, _) = get_json(&mut router, &state, "/searchProducts?query=producto").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(
        &mut router,
        &state,
        "/searchProducts?catalogId=catalog:doesnotexist",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_stats_aggregates_products() {
    let (state, mut router) = setup().await;
    let catalog_id = seeded_catalog_id(&mut router, &state).await;

    let uri = format!("/getCatalogStats?catalogId={}", catalog_id);
    let (status, body) = get_json(&mut router, &state, &uri).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["totalProducts"], 2);
    let total_value = body["totalValue"].as_f64().unwrap();
    assert!((total_value - 249.98).abs() < 1e-6);
    assert_eq!(body["inStock"], 2);
    assert_eq!(body["outOfStock"], 0);
    assert_eq!(body["untracked"], 0);

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn catalog_stats_requires_catalog_id() {
    let (state, mut router) = setup().await;
    let (status, _) = get_json(&mut router, &state, "/getCatalogStats").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (state, mut router) = setup().await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(&state, request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
