//! Drives the router in-process, without binding a socket.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{plan_invoice, test_state};
use invoice_service::services::{InMemoryInvoiceStore, InvoiceStore};
use invoice_service::startup::build_router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/invoices/createInvoice")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_persists_into_shared_store() {
    let store = Arc::new(InMemoryInvoiceStore::new());
    let app = build_router(test_state(store.clone()));

    let response = app.oneshot(create_request(&plan_invoice())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored = store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].invoice_id, 4821);
    assert_eq!(stored[0].grand_total.to_string(), "9.99");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = build_router(test_state(Arc::new(InMemoryInvoiceStore::new())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/receipts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_through_router_removes_from_store() {
    let store = Arc::new(InMemoryInvoiceStore::new());
    let app = build_router(test_state(store.clone()));

    let response = app
        .clone()
        .oneshot(create_request(&plan_invoice()))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["invoice"]["_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/invoices/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.get_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_method_on_create_route_is_rejected() {
    let app = build_router(test_state(Arc::new(InMemoryInvoiceStore::new())));

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/invoices/createInvoice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
