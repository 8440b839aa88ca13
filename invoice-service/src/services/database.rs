use super::store::{parse_invoice_id, InvoiceStore};
use crate::models::{Invoice, NewInvoice};
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

const INVOICES_COLLECTION: &str = "invoices";

#[derive(Clone)]
pub struct MongoInvoiceStore {
    client: MongoClient,
    db: Database,
}

impl MongoInvoiceStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for invoice-service");

        let invoices = self.invoices();

        // Listing returns invoices in creation order
        let created_index = IndexModel::builder()
            .keys(doc! { "created_at": 1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_idx".to_string())
                    .build(),
            )
            .build();

        invoices
            .create_index(created_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create created_at index: {}", e);
                AppError::from(e)
            })?;

        // Human-facing numbers are not unique, so this index is not either
        let number_index = IndexModel::builder()
            .keys(doc! { "invoice_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("invoice_id_idx".to_string())
                    .build(),
            )
            .build();

        invoices
            .create_index(number_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create invoice_id index: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn invoices(&self) -> Collection<Invoice> {
        self.db.collection(INVOICES_COLLECTION)
    }
}

#[async_trait]
impl InvoiceStore for MongoInvoiceStore {
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, AppError> {
        let invoice = invoice.into_invoice(ObjectId::new(), Utc::now());
        self.invoices()
            .insert_one(&invoice, None)
            .await
            .map_err(|e| {
                tracing::error!(invoice_id = invoice.invoice_id, "Failed to insert invoice: {}", e);
                AppError::from(e)
            })?;
        Ok(invoice)
    }

    async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": 1, "_id": 1 })
            .build();

        let cursor = self
            .invoices()
            .find(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list invoices: {}", e);
                AppError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect invoices: {}", e);
            AppError::from(e)
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        let Some(oid) = parse_invoice_id(id) else {
            return Ok(None);
        };
        self.invoices()
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(id = %id, "Failed to find invoice: {}", e);
                AppError::from(e)
            })
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        let Some(oid) = parse_invoice_id(id) else {
            return Ok(None);
        };
        self.invoices()
            .find_one_and_delete(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(id = %id, "Failed to delete invoice: {}", e);
                AppError::from(e)
            })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
