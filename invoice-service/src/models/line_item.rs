//! Line item model for invoice-service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Editable field of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemField {
    Description,
    UnitAmount,
    Quantity,
}

/// A single billable entry on an invoice.
///
/// The line total is derived on read and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LineItemDocument", into = "LineItemDocument")]
pub struct LineItem {
    id: String,
    description: String,
    unit_amount: Decimal,
    quantity: i64,
}

/// Stored shape of a line item. `total` is written for readers of the raw
/// document and ignored on the way back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LineItemDocument {
    id: String,
    description: String,
    amount: Decimal,
    quantity: i64,
    #[serde(default)]
    total: Decimal,
}

impl From<LineItemDocument> for LineItem {
    fn from(doc: LineItemDocument) -> Self {
        Self {
            id: doc.id,
            description: doc.description,
            unit_amount: doc.amount,
            quantity: doc.quantity,
        }
    }
}

impl From<LineItem> for LineItemDocument {
    fn from(item: LineItem) -> Self {
        let total = item.line_total();
        Self {
            id: item.id,
            description: item.description,
            amount: item.unit_amount,
            quantity: item.quantity,
            total,
        }
    }
}

impl LineItem {
    pub fn new(description: impl Into<String>, unit_amount: Decimal, quantity: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            unit_amount,
            quantity,
        }
    }

    /// An empty row: no description, zero amount, quantity one.
    pub fn blank() -> Self {
        Self::new("", Decimal::ZERO, 1)
    }

    /// Replaces the client-side identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_amount(&self) -> Decimal {
        self.unit_amount
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_amount.saturating_mul(Decimal::from(self.quantity))
    }

    /// Returns a copy with `field` set from raw form input.
    pub fn update(&self, field: LineItemField, value: &str) -> Self {
        let mut item = self.clone();
        match field {
            LineItemField::Description => item.description = value.to_string(),
            LineItemField::UnitAmount => item.unit_amount = coerce_amount(value),
            LineItemField::Quantity => item.quantity = coerce_quantity(value),
        }
        item
    }
}

/// Parses a currency amount, treating anything unparseable as zero.
pub fn coerce_amount(raw: &str) -> Decimal {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

/// Parses a quantity, truncating fractions and treating garbage as zero.
pub fn coerce_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    raw.parse::<i64>().unwrap_or_else(|_| {
        Decimal::from_str(raw)
            .ok()
            .and_then(|d| i64::try_from(d.trunc()).ok())
            .unwrap_or(0)
    })
}
