pub mod invoices;
pub mod lenient;

pub use invoices::{
    CreateInvoiceRequest, InvoiceEnvelope, InvoiceListResponse, InvoiceResponse, LineItemRequest,
    LineItemResponse, MessageResponse,
};
