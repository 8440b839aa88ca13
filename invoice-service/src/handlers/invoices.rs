//! REST handlers for `/api/invoices`.

use crate::dtos::{
    CreateInvoiceRequest, InvoiceEnvelope, InvoiceListResponse, InvoiceResponse, MessageResponse,
};
use crate::models::InvoiceValidator;
use crate::services::record_invoice_operation;
use crate::startup::AppState;
use crate::utils::JsonBody;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

const INVOICE_ID_REQUIRED: &str = "Invoice number is required";
const GRAND_TOTAL_REQUIRED: &str = "Grand total is required";

/// POST /api/invoices/createInvoice
pub async fn create_invoice(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceEnvelope>), AppError> {
    let (draft, claimed_total) = req.into_draft();

    let mut report = InvoiceValidator::validate(&draft);
    if draft.invoice_number.is_none() {
        report.reject("invoiceId", INVOICE_ID_REQUIRED);
    }
    if claimed_total.is_none() {
        report.reject("grandTotal", GRAND_TOTAL_REQUIRED);
    }

    let number = match draft.invoice_number {
        Some(number) if report.is_valid() => number,
        _ => {
            tracing::info!(errors = report.len(), "Rejected invoice with missing fields");
            record_invoice_operation("create", "invalid");
            return Err(AppError::ValidationError(report.into()));
        }
    };

    let invoice = draft.finalize(number).map_err(|report| {
        record_invoice_operation("create", "invalid");
        AppError::ValidationError(report.into())
    })?;

    if let Some(claimed) = claimed_total {
        if claimed != invoice.grand_total {
            tracing::warn!(
                invoice_id = number,
                claimed = %claimed,
                computed = %invoice.grand_total,
                "Client grand total disagrees with line items; storing computed total"
            );
        }
    }

    let created = state.store.create(invoice).await.map_err(|e| {
        record_invoice_operation("create", "error");
        e
    })?;

    tracing::info!(
        id = %created.id,
        invoice_id = created.invoice_id,
        items = created.items.len(),
        "Invoice created"
    );
    record_invoice_operation("create", "ok");

    Ok((
        StatusCode::CREATED,
        Json(InvoiceEnvelope {
            message: "Invoice Created Successfully".to_string(),
            invoice: created.into(),
        }),
    ))
}

/// GET /api/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<InvoiceListResponse>, AppError> {
    let invoices = state.store.list().await.map_err(|e| {
        record_invoice_operation("list", "error");
        e
    })?;

    if invoices.is_empty() {
        record_invoice_operation("list", "not_found");
        return Err(AppError::NotFound(anyhow::anyhow!("No Invoices Found")));
    }

    tracing::debug!(count = invoices.len(), "Invoices fetched");
    record_invoice_operation("list", "ok");

    Ok(Json(InvoiceListResponse {
        message: "Invoices Fetched Successfully".to_string(),
        invoices: invoices.into_iter().map(InvoiceResponse::from).collect(),
    }))
}

/// GET /api/invoices/:id
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceEnvelope>, AppError> {
    let invoice = state.store.get_by_id(&id).await.map_err(|e| {
        record_invoice_operation("get", "error");
        e
    })?;

    let Some(invoice) = invoice else {
        tracing::debug!(id = %id, "Invoice not found");
        record_invoice_operation("get", "not_found");
        return Err(AppError::NotFound(anyhow::anyhow!("Invoice not Found")));
    };

    record_invoice_operation("get", "ok");
    Ok(Json(InvoiceEnvelope {
        message: "Invoice Successfully Found by id".to_string(),
        invoice: invoice.into(),
    }))
}

/// DELETE /api/invoices/:id
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = state.store.delete_by_id(&id).await.map_err(|e| {
        record_invoice_operation("delete", "error");
        e
    })?;

    match deleted {
        Some(invoice) => {
            tracing::info!(id = %id, invoice_id = invoice.invoice_id, "Invoice deleted");
            record_invoice_operation("delete", "ok");
            Ok(Json(MessageResponse {
                message: "Invoice deleted successfully".to_string(),
            }))
        }
        None => {
            record_invoice_operation("delete", "not_found");
            Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")))
        }
    }
}
