//! Editing session for a single invoice draft.

use super::invoice::{generate_invoice_number, HeaderField, InvoiceDraft, NewInvoice};
use super::line_item::LineItemField;
use super::validation::{InvoiceValidator, ValidationReport, ITEMS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Empty,
    Editing,
    Valid,
    Invalid,
}

/// Owns a draft and its last validation result.
///
/// Every edit moves the form back to `Editing` and clears the error for the
/// touched field; only a `Valid` form can be submitted.
#[derive(Debug, Clone)]
pub struct InvoiceForm {
    draft: InvoiceDraft,
    report: ValidationReport,
    state: DraftState,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceForm {
    pub fn new() -> Self {
        Self {
            draft: InvoiceDraft::new(),
            report: ValidationReport::default(),
            state: DraftState::Empty,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.report
    }

    pub fn set_header(&mut self, field: HeaderField, value: &str) {
        self.edit(field.key(), |draft| draft.set_header(field, value));
    }

    pub fn add_item(&mut self) {
        self.edit(ITEMS_KEY, InvoiceDraft::add_item);
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.edit(ITEMS_KEY, |draft| draft.remove_item(item_id));
    }

    pub fn update_item(&mut self, item_id: &str, field: LineItemField, value: &str) {
        self.edit(ITEMS_KEY, |draft| draft.update_item(item_id, field, value));
    }

    pub fn clear_items(&mut self) {
        self.edit(ITEMS_KEY, InvoiceDraft::clear_items);
    }

    fn edit(&mut self, key: &str, apply: impl FnOnce(InvoiceDraft) -> InvoiceDraft) {
        let draft = std::mem::take(&mut self.draft);
        self.draft = apply(draft);
        self.report.clear(key);
        self.state = DraftState::Editing;
    }

    /// Validates the current draft and records the outcome.
    pub fn validate(&mut self) -> DraftState {
        self.report = InvoiceValidator::validate(&self.draft);
        self.state = if self.report.is_valid() {
            DraftState::Valid
        } else {
            DraftState::Invalid
        };
        self.state
    }

    /// Produces the invoice to hand to a store, assigning a number when the
    /// draft has none. The form keeps its draft until [`reset`](Self::reset).
    pub fn submit(&mut self) -> Result<NewInvoice, ValidationReport> {
        if self.validate() != DraftState::Valid {
            return Err(self.report.clone());
        }
        let number = self
            .draft
            .invoice_number
            .unwrap_or_else(generate_invoice_number);
        self.draft.invoice_number = Some(number);
        self.draft.clone().finalize(number)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut InvoiceForm) {
        form.set_header(HeaderField::SenderName, "Acme Ltd");
        form.set_header(HeaderField::SenderAddress, "1 Road");
        form.set_header(HeaderField::ReceiverName, "Globex");
        form.set_header(HeaderField::ReceiverAddress, "2 Street");
        form.set_header(HeaderField::IssuedOn, "2025-01-01");
        form.set_header(HeaderField::DueOn, "2025-01-31");
        form.set_header(HeaderField::PaidOn, "2025-01-15");
        let id = form.draft().items()[0].id().to_string();
        form.update_item(&id, LineItemField::Description, "Plan");
        form.update_item(&id, LineItemField::UnitAmount, "9.99");
    }

    #[test]
    fn fresh_form_is_empty() {
        let form = InvoiceForm::new();
        assert_eq!(form.state(), DraftState::Empty);
        assert!(form.errors().is_valid());
    }

    #[test]
    fn editing_then_validating_blank_form_is_invalid() {
        let mut form = InvoiceForm::new();
        form.set_header(HeaderField::SenderName, "Acme");
        assert_eq!(form.state(), DraftState::Editing);
        assert_eq!(form.validate(), DraftState::Invalid);
        assert!(form.errors().message("senderAddress").is_some());
        assert!(form.errors().message("senderName").is_none());
    }

    #[test]
    fn editing_a_field_clears_its_error_and_reenters_editing() {
        let mut form = InvoiceForm::new();
        form.validate();
        assert!(form.errors().message("dueOn").is_some());

        form.set_header(HeaderField::DueOn, "2025-05-05");
        assert_eq!(form.state(), DraftState::Editing);
        assert!(form.errors().message("dueOn").is_none());
        assert!(form.errors().message("paidOn").is_some());
    }

    #[test]
    fn item_edit_clears_items_error() {
        let mut form = InvoiceForm::new();
        form.validate();
        assert!(form.errors().message(ITEMS_KEY).is_some());
        form.add_item();
        assert!(form.errors().message(ITEMS_KEY).is_none());
    }

    #[test]
    fn submit_is_refused_while_invalid() {
        let mut form = InvoiceForm::new();
        let report = form.submit().unwrap_err();
        assert_eq!(form.state(), DraftState::Invalid);
        assert!(report.message("receiverName").is_some());
    }

    #[test]
    fn submit_from_valid_assigns_number_and_total() {
        let mut form = InvoiceForm::new();
        fill(&mut form);
        let invoice = form.submit().unwrap();
        assert_eq!(form.state(), DraftState::Valid);
        assert!((1000..=9999).contains(&invoice.invoice_id));
        assert_eq!(form.draft().invoice_number, Some(invoice.invoice_id));
        assert_eq!(invoice.grand_total.to_string(), "9.99");
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut form = InvoiceForm::new();
        fill(&mut form);
        form.reset();
        assert_eq!(form.state(), DraftState::Empty);
        assert!(form.draft().sender_name.is_empty());
        assert_eq!(form.draft().invoice_number, None);
        assert_eq!(form.draft().items().len(), 1);
    }
}
