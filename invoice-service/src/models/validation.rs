//! Required-field validation for invoice drafts.

use super::invoice::{HeaderField, InvoiceDraft};
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Key under which every item-level failure is reported.
pub const ITEMS_KEY: &str = "items";

const NO_ITEMS: &str = "At least one item is required";
const ITEM_DESCRIPTION: &str = "Each item must have a description";
const ITEM_AMOUNT: &str = "Each item must have a valid amount";

/// Outcome of validating a draft: field key to message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Records `message` for `field`, replacing any earlier message.
    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl From<ValidationReport> for ValidationErrors {
    fn from(report: ValidationReport) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, message) in report.errors {
            let mut error = ValidationError::new("required");
            error.message = Some(Cow::Owned(message));
            errors.add(field, error);
        }
        errors
    }
}

/// Checks required-field presence and per-item validity.
pub struct InvoiceValidator;

impl InvoiceValidator {
    /// Runs every check; nothing short-circuits.
    ///
    /// Item failures share the `items` key and the last one encountered
    /// wins: the description check runs before the amount check, item by
    /// item in order.
    pub fn validate(draft: &InvoiceDraft) -> ValidationReport {
        let mut report = ValidationReport::default();

        for field in HeaderField::ALL {
            if !header_present(draft, field) {
                report.reject(field.key(), header_message(field));
            }
        }

        if draft.items().is_empty() {
            report.reject(ITEMS_KEY, NO_ITEMS);
        }

        for item in draft.items() {
            if item.description().is_empty() {
                report.reject(ITEMS_KEY, ITEM_DESCRIPTION);
            }
            if item.unit_amount() <= rust_decimal::Decimal::ZERO {
                report.reject(ITEMS_KEY, ITEM_AMOUNT);
            }
        }

        report
    }
}

fn header_present(draft: &InvoiceDraft, field: HeaderField) -> bool {
    match field {
        HeaderField::SenderName => !draft.sender_name.is_empty(),
        HeaderField::SenderAddress => !draft.sender_address.is_empty(),
        HeaderField::ReceiverName => !draft.receiver_name.is_empty(),
        HeaderField::ReceiverAddress => !draft.receiver_address.is_empty(),
        HeaderField::IssuedOn => draft.issued_on.is_some(),
        HeaderField::DueOn => draft.due_on.is_some(),
        HeaderField::PaidOn => draft.paid_on.is_some(),
    }
}

fn header_message(field: HeaderField) -> &'static str {
    match field {
        HeaderField::SenderName => "Sender name is required",
        HeaderField::SenderAddress => "Sender address is required",
        HeaderField::ReceiverName => "Receiver name is required",
        HeaderField::ReceiverAddress => "Receiver address is required",
        HeaderField::IssuedOn => "Issued On date is required",
        HeaderField::DueOn => "Due On date is required",
        HeaderField::PaidOn => "Paid On date is required",
    }
}

impl Validate for InvoiceDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let report = InvoiceValidator::validate(self);
        if report.is_valid() {
            Ok(())
        } else {
            Err(report.into())
        }
    }
}
