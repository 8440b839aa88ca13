//! Persistence contract for invoices.

use crate::models::{Invoice, NewInvoice};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Create, list, fetch and delete invoices by store-assigned identifier.
///
/// Identifiers are 24-character hex object ids. A malformed identifier can
/// never match a record, so lookups and deletes report it as absent.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Persists `invoice`, assigning its identifier and timestamps.
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, AppError>;

    /// All invoices in creation order.
    async fn list(&self) -> Result<Vec<Invoice>, AppError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Invoice>, AppError>;

    /// Removes and returns the invoice, or `None` if it did not exist.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Invoice>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Parses a path identifier; `None` means it cannot name any invoice.
pub fn parse_invoice_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
