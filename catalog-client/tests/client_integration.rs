// catalog-client/tests/client_integration.rs
// Integration tests against a mock catalog API

use std::sync::Arc;

use catalog_client::{
    CatalogApi, ClientConfig, ConnectivityFlag, FailureKind, HttpCatalogClient, ProductDraft,
    ProductId,
};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpCatalogClient {
    ClientConfig::new(server.uri()).build_http_client().unwrap()
}

fn draft() -> ProductDraft {
    ProductDraft {
        title: "Desk Lamp".into(),
        price: Decimal::new(1550, 2),
        category: "home".into(),
        image: Some("https://cdn.example.com/lamp.png".into()),
        stock: 12,
    }
}

/// Address with nothing listening on it
async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_list_normalizes_page_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                { "id": 1, "title": "Mascara", "price": 9.99, "category": "beauty",
                  "stock": 99, "thumbnail": "https://cdn.example.com/1.png" },
                { "id": 2, "price": 19 }
            ],
            "total": 194, "skip": 0, "limit": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let products = client_for(&server).list(10).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].image, "https://cdn.example.com/1.png");
    assert_eq!(products[1].title, "Untitled Product");
    assert_eq!(products[1].price_label(), "19.00");
    assert_eq!(products[1].sku, "SKU-002");
}

#[tokio::test]
async fn test_list_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "p-1" }])))
        .mount(&server)
        .await;

    let products = client_for(&server).list(5).await.unwrap();
    assert_eq!(products[0].id, ProductId::from("p-1"));
}

#[tokio::test]
async fn test_list_server_error_is_server_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).list(10).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::ServerStatus(503));
    assert!(err.detail.contains("maintenance"));
}

#[tokio::test]
async fn test_list_invalid_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list(10).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn test_list_record_without_id_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{ "id": 1 }, { "title": "ghost" }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).list(10).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
    assert!(err.detail.contains("index 1"));
}

#[tokio::test]
async fn test_get_missing_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Product with id '404' not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get(&ProductId::Int(404))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::ServerStatus(404));
}

#[tokio::test]
async fn test_create_sends_draft_with_upstream_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products/add"))
        .and(body_partial_json(json!({
            "title": "Desk Lamp",
            "price": 15.5,
            "stock": 12,
            "brand": "Generic",
            "description": "Desk Lamp - Quality product in home category"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 195, "title": "Desk Lamp", "price": 15.5, "category": "home",
            "stock": 12, "image": "https://cdn.example.com/lamp.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = client_for(&server).create(&draft()).await.unwrap();
    assert_eq!(product.id, ProductId::Int(195));
    assert_eq!(product.sku, "SKU-195");
    assert_eq!(product.price_label(), "15.50");
}

#[tokio::test]
async fn test_update_with_foreign_id_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 8 })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update(&ProductId::Int(7), &draft())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn test_update_returns_normalized_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "title": "Desk Lamp", "price": 15.5, "stock": 12
        })))
        .mount(&server)
        .await;

    let product = client_for(&server)
        .update(&ProductId::Int(7), &draft())
        .await
        .unwrap();
    assert_eq!(product.title, "Desk Lamp");
    assert_eq!(product.stock, 12);
}

#[tokio::test]
async fn test_update_accepts_numeric_id_for_text_target() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "title": "Desk Lamp"
        })))
        .mount(&server)
        .await;

    let product = client_for(&server)
        .update(&ProductId::from("7"), &draft())
        .await
        .unwrap();
    assert_eq!(product.id, ProductId::from("7"));
    assert_eq!(product.sku, "SKU-007");
}

#[tokio::test]
async fn test_delete_requires_ok_acknowledgment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "isDeleted": true, "deletedOn": "2024-05-01T00:00:00.000Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 3, "isDeleted": false })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete(&ProductId::Int(1)).await.unwrap();

    let err = client.delete(&ProductId::Int(2)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::ServerStatus(204));

    let err = client.delete(&ProductId::Int(3)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn test_unreachable_server_is_network_failure() {
    let client = ClientConfig::new(closed_address().await)
        .build_http_client()
        .unwrap();

    let err = client.list(10).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn test_unreachable_server_while_offline_is_offline() {
    let flag = ConnectivityFlag::new(false);
    let client = ClientConfig::new(closed_address().await)
        .build_http_client()
        .unwrap()
        .with_connectivity(Arc::new(flag));

    let err = client.delete(&ProductId::Int(1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Offline);
}
