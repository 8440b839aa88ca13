//! Domain models for invoice-service.

mod form;
mod invoice;
mod line_item;
mod validation;

pub use form::{DraftState, InvoiceForm};
pub use invoice::{
    generate_invoice_number, grand_total, parse_date, HeaderField, Invoice, InvoiceDraft,
    NewInvoice,
};
pub use line_item::{coerce_amount, coerce_quantity, LineItem, LineItemField};
pub use validation::{InvoiceValidator, ValidationReport, ITEMS_KEY};
