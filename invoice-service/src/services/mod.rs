pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoInvoiceStore;
pub use memory::InMemoryInvoiceStore;
pub use metrics::{get_metrics, init_metrics, record_invoice_operation};
pub use store::InvoiceStore;
