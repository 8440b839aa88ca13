use super::lenient;
use crate::models::{Invoice, InvoiceDraft, LineItem};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/invoices/createInvoice`.
///
/// Every field is optional at the serde level so that missing values reach
/// validation and come back as field errors instead of a parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[serde(default, deserialize_with = "lenient::invoice_number")]
    pub invoice_id: Option<u32>,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_address: String,
    #[serde(default)]
    pub receiver_name: String,
    #[serde(default)]
    pub receiver_address: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub issued_on: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub due_on: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub paid_on: Option<NaiveDate>,
    #[serde(default)]
    pub items: Option<Vec<LineItemRequest>>,
    #[serde(default, deserialize_with = "lenient::optional_amount")]
    pub grand_total: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "unitAmount", deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    #[serde(default = "default_quantity", deserialize_with = "lenient::quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl From<LineItemRequest> for LineItem {
    fn from(req: LineItemRequest) -> Self {
        let item = LineItem::new(req.description, req.amount, req.quantity);
        match req.id.filter(|id| !id.is_empty()) {
            Some(id) => item.with_id(id),
            None => item,
        }
    }
}

impl CreateInvoiceRequest {
    /// Splits the request into the draft and the client's claimed total.
    pub fn into_draft(self) -> (InvoiceDraft, Option<Decimal>) {
        let items = self
            .items
            .unwrap_or_default()
            .into_iter()
            .map(LineItem::from)
            .collect();

        let mut draft = InvoiceDraft::default().with_items(items);
        draft.invoice_number = self.invoice_id;
        draft.sender_name = self.sender_name;
        draft.sender_address = self.sender_address;
        draft.receiver_name = self.receiver_name;
        draft.receiver_address = self.receiver_address;
        draft.issued_on = self.issued_on;
        draft.due_on = self.due_on;
        draft.paid_on = self.paid_on;

        (draft, self.grand_total)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<&LineItem> for LineItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id().to_string(),
            description: item.description().to_string(),
            amount: item.unit_amount(),
            quantity: item.quantity(),
            total: item.line_total(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub invoice_id: u32,
    pub sender_name: String,
    pub sender_address: String,
    pub receiver_name: String,
    pub receiver_address: String,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub paid_on: NaiveDate,
    pub items: Vec<LineItemResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.to_hex(),
            invoice_id: invoice.invoice_id,
            sender_name: invoice.sender_name,
            sender_address: invoice.sender_address,
            receiver_name: invoice.receiver_name,
            receiver_address: invoice.receiver_address,
            issued_on: invoice.issued_on,
            due_on: invoice.due_on,
            paid_on: invoice.paid_on,
            items: invoice.items.iter().map(LineItemResponse::from).collect(),
            grand_total: invoice.grand_total,
            created_at: invoice.created_at.to_rfc3339(),
            updated_at: invoice.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceEnvelope {
    pub message: String,
    pub invoice: InvoiceResponse,
}

#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub message: String,
    pub invoices: Vec<InvoiceResponse>,
}
