//! Invoice aggregate for invoice-service.
//!
//! [`InvoiceDraft`] is the editable, unpersisted aggregate. [`NewInvoice`] is
//! a draft that passed validation and carries a frozen grand total, and
//! [`Invoice`] is the record the store hands back.

use super::line_item::{LineItem, LineItemField};
use super::validation::{InvoiceValidator, ValidationReport};
use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Header input of the invoice form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    SenderName,
    SenderAddress,
    ReceiverName,
    ReceiverAddress,
    IssuedOn,
    DueOn,
    PaidOn,
}

impl HeaderField {
    pub const ALL: [HeaderField; 7] = [
        HeaderField::SenderName,
        HeaderField::SenderAddress,
        HeaderField::ReceiverName,
        HeaderField::ReceiverAddress,
        HeaderField::IssuedOn,
        HeaderField::DueOn,
        HeaderField::PaidOn,
    ];

    /// Wire name, also used as the validation error key.
    pub fn key(&self) -> &'static str {
        match self {
            HeaderField::SenderName => "senderName",
            HeaderField::SenderAddress => "senderAddress",
            HeaderField::ReceiverName => "receiverName",
            HeaderField::ReceiverAddress => "receiverAddress",
            HeaderField::IssuedOn => "issuedOn",
            HeaderField::DueOn => "dueOn",
            HeaderField::PaidOn => "paidOn",
        }
    }
}

/// In-progress invoice owned by whoever is editing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub invoice_number: Option<u32>,
    pub sender_name: String,
    pub sender_address: String,
    pub receiver_name: String,
    pub receiver_address: String,
    pub issued_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    pub paid_on: Option<NaiveDate>,
    items: Vec<LineItem>,
}

impl InvoiceDraft {
    /// The empty form: no header values and a single blank row.
    pub fn new() -> Self {
        Self::default().with_items(vec![LineItem::blank()])
    }

    pub fn with_items(mut self, items: Vec<LineItem>) -> Self {
        self.items = items;
        self
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Appends a blank row.
    pub fn add_item(self) -> Self {
        self.push_item(LineItem::blank())
    }

    pub fn push_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Removes the row with `item_id`. Unknown ids leave the draft unchanged.
    pub fn remove_item(mut self, item_id: &str) -> Self {
        self.items.retain(|item| item.id() != item_id);
        self
    }

    pub fn update_item(mut self, item_id: &str, field: LineItemField, value: &str) -> Self {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == item_id) {
            *item = item.update(field, value);
        }
        self
    }

    /// Resets the rows to a single blank item.
    pub fn clear_items(self) -> Self {
        self.with_items(vec![LineItem::blank()])
    }

    /// Sets a header field from raw form input. Date text that does not
    /// parse leaves the date unset.
    pub fn set_header(mut self, field: HeaderField, value: &str) -> Self {
        match field {
            HeaderField::SenderName => self.sender_name = value.to_string(),
            HeaderField::SenderAddress => self.sender_address = value.to_string(),
            HeaderField::ReceiverName => self.receiver_name = value.to_string(),
            HeaderField::ReceiverAddress => self.receiver_address = value.to_string(),
            HeaderField::IssuedOn => self.issued_on = parse_date(value),
            HeaderField::DueOn => self.due_on = parse_date(value),
            HeaderField::PaidOn => self.paid_on = parse_date(value),
        }
        self
    }

    pub fn grand_total(&self) -> Decimal {
        grand_total(&self.items)
    }

    /// Validates the draft and freezes it for persistence.
    pub fn finalize(self, invoice_number: u32) -> Result<NewInvoice, ValidationReport> {
        let report = InvoiceValidator::validate(&self);
        if !report.is_valid() {
            return Err(report);
        }

        // Presence of every date is guaranteed by a valid report.
        match (self.issued_on, self.due_on, self.paid_on) {
            (Some(issued_on), Some(due_on), Some(paid_on)) => {
                let grand_total = grand_total(&self.items);
                Ok(NewInvoice {
                    invoice_id: invoice_number,
                    sender_name: self.sender_name,
                    sender_address: self.sender_address,
                    receiver_name: self.receiver_name,
                    receiver_address: self.receiver_address,
                    issued_on,
                    due_on,
                    paid_on,
                    items: self.items,
                    grand_total,
                })
            }
            _ => Err(report),
        }
    }
}

/// Sum of line totals.
pub fn grand_total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.line_total()))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Human-facing invoice number in `1000..=9999`. Not guaranteed unique.
pub fn generate_invoice_number() -> u32 {
    rand::thread_rng().gen_range(1000..=9999)
}

/// A validated invoice ready to be handed to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub invoice_id: u32,
    pub sender_name: String,
    pub sender_address: String,
    pub receiver_name: String,
    pub receiver_address: String,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub paid_on: NaiveDate,
    pub items: Vec<LineItem>,
    pub grand_total: Decimal,
}

impl NewInvoice {
    /// Attaches store-assigned identity and timestamps.
    pub fn into_invoice(self, id: ObjectId, now: DateTime<Utc>) -> Invoice {
        Invoice {
            id,
            invoice_id: self.invoice_id,
            sender_name: self.sender_name,
            sender_address: self.sender_address,
            receiver_name: self.receiver_name,
            receiver_address: self.receiver_address,
            issued_on: self.issued_on,
            due_on: self.due_on,
            paid_on: self.paid_on,
            items: self.items,
            grand_total: self.grand_total,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persisted invoice document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub invoice_id: u32,
    pub sender_name: String,
    pub sender_address: String,
    pub receiver_name: String,
    pub receiver_address: String,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub paid_on: NaiveDate,
    pub items: Vec<LineItem>,
    pub grand_total: Decimal,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}
