#![allow(dead_code)]

use async_trait::async_trait;
use invoice_service::config::{CorsConfig, InvoiceConfig, MongoConfig};
use invoice_service::models::{Invoice, NewInvoice};
use invoice_service::services::{InMemoryInvoiceStore, InvoiceStore};
use invoice_service::startup::{AppState, Application};
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::Arc;

pub const FRONTEND_ORIGIN: &str = "http://localhost:5173";

pub fn test_config() -> InvoiceConfig {
    InvoiceConfig {
        common: CoreConfig { port: 0 },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "invoice_test".to_string(),
        },
        cors: CorsConfig {
            allowed_origins: vec![FRONTEND_ORIGIN.to_string()],
        },
        log_level: "debug".to_string(),
        otlp_endpoint: None,
    }
}

pub fn test_state(store: Arc<dyn InvoiceStore>) -> AppState {
    AppState {
        config: test_config(),
        store,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn InvoiceStore>,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryInvoiceStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn InvoiceStore>) -> Self {
        let app = Application::build_with_store(test_config(), store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            store,
            client: reqwest::Client::new(),
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn create(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/invoices/createInvoice", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/api/invoices", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/api/invoices/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/api/invoices/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// The payload the invoice form posts for a single "Plan" row.
pub fn plan_invoice() -> Value {
    json!({
        "invoiceId": 4821,
        "senderName": "Acme Ltd",
        "senderAddress": "1 Infinite Loop",
        "receiverName": "Globex Corp",
        "receiverAddress": "742 Evergreen Terrace",
        "issuedOn": "2025-01-01",
        "dueOn": "2025-01-31",
        "paidOn": "2025-01-15",
        "items": [
            { "id": "1736000000000", "description": "Plan", "amount": 9.99, "quantity": 1, "total": 9.99 }
        ],
        "grandTotal": 9.99
    })
}

/// Store whose every call fails, standing in for an unreachable database.
pub struct FailingStore;

fn unavailable() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("connection refused: mongodb://10.0.0.7:27017"))
}

#[async_trait]
impl InvoiceStore for FailingStore {
    async fn create(&self, _invoice: NewInvoice) -> Result<Invoice, AppError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        Err(unavailable())
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<Invoice>, AppError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<Option<Invoice>, AppError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}
