//! Rendering surface the booking controller writes to.
//!
//! The controller never looks up page elements itself. Everything it shows or
//! reads goes through [`BookingSurface`], keyed by the identifiers below, so the
//! same logic drives the yew widget, the QA harness and unit tests.

use crate::booking::SubmissionStatus;
use crate::payment::{PaymentMethod, PaymentStamp};
use crate::wizard::WizardStep;
use std::collections::{BTreeMap, BTreeSet};

/// Text targets written by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextField {
    SelectedCount,
    SelectedTotal,
    ModalTotal,
    InvoiceId,
    SummaryInvoiceId,
    SummaryName,
    SummaryService,
    SummaryCode,
    SummaryDate,
    SummaryPrice,
    SummaryTax,
    SummaryTotal,
}

impl TextField {
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::SelectedCount => "selected-count",
            Self::SelectedTotal => "selected-total",
            Self::ModalTotal => "modal-total-price",
            Self::InvoiceId => "invoice-id",
            Self::SummaryInvoiceId => "summ-invoice-id",
            Self::SummaryName => "summ-name",
            Self::SummaryService => "summ-service",
            Self::SummaryCode => "summ-code",
            Self::SummaryDate => "summ-date",
            Self::SummaryPrice => "summ-price",
            Self::SummaryTax => "summ-tax",
            Self::SummaryTotal => "summ-total",
        }
    }
}

/// Form inputs read by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputField {
    BookingDate,
    PatientName,
    PatientEmail,
    PatientPhone,
    PatientAge,
    PatientGender,
    PatientAddress,
    /// The checked `payment` radio.
    Payment,
}

impl InputField {
    pub const PATIENT: [Self; 6] = [
        Self::PatientName,
        Self::PatientEmail,
        Self::PatientPhone,
        Self::PatientAge,
        Self::PatientGender,
        Self::PatientAddress,
    ];

    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::BookingDate => "booking-date",
            Self::PatientName => "patient-name",
            Self::PatientEmail => "patient-email",
            Self::PatientPhone => "patient-phone",
            Self::PatientAge => "patient-age",
            Self::PatientGender => "patient-gender",
            Self::PatientAddress => "patient-address",
            Self::Payment => "payment",
        }
    }
}

/// Regions whose visibility the controller toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    FloatingBar,
    Modal,
    CardDetails,
}

impl Region {
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::FloatingBar => "floating-book-bar",
            Self::Modal => "bookingModal",
            Self::CardDetails => "card-details",
        }
    }
}

/// One row of the wizard's service summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub name: String,
    pub price_text: String,
}

/// Injected rendering capability.
pub trait BookingSurface {
    fn set_text(&mut self, field: TextField, text: &str);

    /// Current value of an input, or `None` when the input is not on the page.
    fn input(&self, field: InputField) -> Option<String>;

    fn set_input(&mut self, field: InputField, value: &str);

    fn set_visible(&mut self, region: Region, visible: bool);

    /// Make `step` the only active wizard step.
    fn show_step(&mut self, step: WizardStep);

    fn mark_service(&mut self, name: &str, selected: bool);

    /// Make `method` the only selected payment option.
    fn mark_payment(&mut self, method: &PaymentMethod);

    fn render_summary(&mut self, lines: &[SummaryLine]);

    fn set_stamp(&mut self, stamp: PaymentStamp);

    fn set_submission(&mut self, status: &SubmissionStatus);

    /// Blocking, user-facing notification.
    fn notify(&mut self, message: &str);
}

/// In-memory surface. The web widget renders from it; tests inspect it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    texts: BTreeMap<TextField, String>,
    inputs: BTreeMap<InputField, String>,
    visible: BTreeSet<Region>,
    active_step: Option<WizardStep>,
    selected_services: BTreeSet<String>,
    selected_payment: Option<PaymentMethod>,
    summary: Vec<SummaryLine>,
    stamp: Option<PaymentStamp>,
    submission: SubmissionStatus,
    notices: Vec<String>,
}

impl MemorySurface {
    /// A surface with every form input present and empty.
    #[must_use]
    pub fn with_form() -> Self {
        let mut surface = Self::default();
        surface.inputs.insert(InputField::BookingDate, String::new());
        for field in InputField::PATIENT {
            surface.inputs.insert(field, String::new());
        }
        surface
    }

    /// Drop an input, as if the page markup lacked it.
    pub fn remove_input(&mut self, field: InputField) {
        self.inputs.remove(&field);
    }

    #[must_use]
    pub fn text(&self, field: TextField) -> Option<&str> {
        self.texts.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn input_value(&self, field: InputField) -> Option<&str> {
        self.inputs.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.contains(&region)
    }

    #[must_use]
    pub const fn active_step(&self) -> Option<WizardStep> {
        self.active_step
    }

    #[must_use]
    pub fn is_service_marked(&self, name: &str) -> bool {
        self.selected_services.contains(name)
    }

    #[must_use]
    pub const fn selected_payment(&self) -> Option<&PaymentMethod> {
        self.selected_payment.as_ref()
    }

    #[must_use]
    pub fn summary(&self) -> &[SummaryLine] {
        &self.summary
    }

    #[must_use]
    pub const fn stamp(&self) -> Option<PaymentStamp> {
        self.stamp
    }

    #[must_use]
    pub const fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Hand pending notices to the caller, leaving none behind.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}

impl BookingSurface for MemorySurface {
    fn set_text(&mut self, field: TextField, text: &str) {
        self.texts.insert(field, text.to_string());
    }

    fn input(&self, field: InputField) -> Option<String> {
        self.inputs.get(&field).cloned()
    }

    fn set_input(&mut self, field: InputField, value: &str) {
        self.inputs.insert(field, value.to_string());
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if visible {
            self.visible.insert(region);
        } else {
            self.visible.remove(&region);
        }
    }

    fn show_step(&mut self, step: WizardStep) {
        self.active_step = Some(step);
    }

    fn mark_service(&mut self, name: &str, selected: bool) {
        if selected {
            self.selected_services.insert(name.to_string());
        } else {
            self.selected_services.remove(name);
        }
    }

    fn mark_payment(&mut self, method: &PaymentMethod) {
        self.selected_payment = Some(method.clone());
        self.inputs
            .insert(InputField::Payment, method.as_str().to_string());
    }

    fn render_summary(&mut self, lines: &[SummaryLine]) {
        self.summary = lines.to_vec();
    }

    fn set_stamp(&mut self, stamp: PaymentStamp) {
        self.stamp = Some(stamp);
    }

    fn set_submission(&mut self, status: &SubmissionStatus) {
        self.submission = status.clone();
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_mark_is_exclusive_and_checks_radio() {
        let mut surface = MemorySurface::with_form();
        assert_eq!(surface.input(InputField::Payment), None);
        surface.mark_payment(&PaymentMethod::Card);
        surface.mark_payment(&PaymentMethod::Cash);
        assert_eq!(surface.selected_payment(), Some(&PaymentMethod::Cash));
        assert_eq!(surface.input(InputField::Payment).as_deref(), Some("cash"));
    }

    #[test]
    fn removed_inputs_read_as_missing() {
        let mut surface = MemorySurface::with_form();
        assert_eq!(surface.input(InputField::PatientName).as_deref(), Some(""));
        surface.remove_input(InputField::PatientName);
        assert_eq!(surface.input(InputField::PatientName), None);
    }

    #[test]
    fn notices_drain_once() {
        let mut surface = MemorySurface::default();
        surface.notify("Please select a date.");
        assert_eq!(surface.take_notices(), vec!["Please select a date.".to_string()]);
        assert!(surface.notices().is_empty());
    }

    #[test]
    fn element_ids_follow_page_markup() {
        assert_eq!(TextField::SummaryService.element_id(), "summ-service");
        assert_eq!(InputField::BookingDate.element_id(), "booking-date");
        assert_eq!(Region::FloatingBar.element_id(), "floating-book-bar");
    }
}
