use super::store::{parse_invoice_id, InvoiceStore};
use crate::models::{Invoice, NewInvoice};
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::{Mutex, MutexGuard};

/// Process-local store used by tests and database-less runs.
#[derive(Default)]
pub struct InMemoryInvoiceStore {
    invoices: Mutex<Vec<Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Invoice>>, AppError> {
        self.invoices
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Invoice store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, AppError> {
        let invoice = invoice.into_invoice(ObjectId::new(), Utc::now());
        self.lock()?.push(invoice.clone());
        Ok(invoice)
    }

    async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        Ok(self.lock()?.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        let Some(oid) = parse_invoice_id(id) else {
            return Ok(None);
        };
        Ok(self.lock()?.iter().find(|inv| inv.id == oid).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        let Some(oid) = parse_invoice_id(id) else {
            return Ok(None);
        };
        let mut invoices = self.lock()?;
        Ok(invoices
            .iter()
            .position(|inv| inv.id == oid)
            .map(|idx| invoices.remove(idx)))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeaderField, InvoiceDraft, LineItem};
    use rust_decimal_macros::dec;

    fn new_invoice(number: u32) -> NewInvoice {
        InvoiceDraft::default()
            .set_header(HeaderField::SenderName, "Acme Ltd")
            .set_header(HeaderField::SenderAddress, "1 Road")
            .set_header(HeaderField::ReceiverName, "Globex")
            .set_header(HeaderField::ReceiverAddress, "2 Street")
            .set_header(HeaderField::IssuedOn, "2025-01-01")
            .set_header(HeaderField::DueOn, "2025-01-31")
            .set_header(HeaderField::PaidOn, "2025-01-15")
            .push_item(LineItem::new("Plan", dec!(9.99), 1))
            .finalize(number)
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_returns_same_invoice() {
        let store = InMemoryInvoiceStore::new();
        let created = store.create(new_invoice(1001)).await.unwrap();
        let fetched = store.get_by_id(&created.id.to_hex()).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn list_preserves_creation_order() {
        let store = InMemoryInvoiceStore::new();
        assert!(store.list().await.unwrap().is_empty());
        store.create(new_invoice(1001)).await.unwrap();
        store.create(new_invoice(1002)).await.unwrap();
        let numbers: Vec<u32> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|inv| inv.invoice_id)
            .collect();
        assert_eq!(numbers, vec![1001, 1002]);
    }

    #[tokio::test]
    async fn delete_is_final() {
        let store = InMemoryInvoiceStore::new();
        let id = store.create(new_invoice(1001)).await.unwrap().id.to_hex();
        assert!(store.delete_by_id(&id).await.unwrap().is_some());
        assert!(store.get_by_id(&id).await.unwrap().is_none());
        assert!(store.delete_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_id_is_absent() {
        let store = InMemoryInvoiceStore::new();
        store.create(new_invoice(1001)).await.unwrap();
        assert!(store.get_by_id("not-an-id").await.unwrap().is_none());
        assert!(store.delete_by_id("not-an-id").await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
