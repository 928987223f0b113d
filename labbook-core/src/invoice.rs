//! Invoice computation: totals, identifiers and the display summary.
use crate::booking::{BookingForm, BookingRecord};
use crate::config::WidgetConfig;
use crate::format::{format_currency, truncate_display};
use crate::money::Money;
use crate::payment::{PaymentMethod, PaymentStamp};
use crate::selection::SelectionStore;
use crate::surface::{BookingSurface, InputField, TextField};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound (exclusive) of the numeric part of an invoice id.
pub const INVOICE_NUMBER_SPAN: u32 = 10_000;
pub const VERIFICATION_CODE_MIN: u16 = 1000;
pub const VERIFICATION_CODE_MAX: u16 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    #[error("required input {} is missing", .0.element_id())]
    MissingInput(InputField),
}

/// `#INV-<n>` with `n` uniform in `0..10000`, no padding. Not unique.
pub fn generate_invoice_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#INV-{}", rng.gen_range(0..INVOICE_NUMBER_SPAN))
}

/// Four-digit code staff use to find the booking. Not secure.
pub fn generate_verification_code<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(VERIFICATION_CODE_MIN..=VERIFICATION_CODE_MAX)
}

/// Subtotal, tax and total for a set of prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    #[must_use]
    pub fn compute(subtotal: Money, tax_rate_bps: u32) -> Self {
        let tax = subtotal.apply_rate_bps(tax_rate_bps);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Read-only snapshot shown on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub verification_code: u16,
    pub patient_name: String,
    pub date: String,
    pub payment: PaymentMethod,
    pub totals: Totals,
    /// Full comma-joined service list.
    pub services: String,
    /// `services` cut for the receipt.
    pub services_display: String,
}

impl Invoice {
    /// Build an invoice from the selection and form.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::MissingInput`] when the patient name, date or
    /// payment method input is absent.
    pub fn compute<R: Rng + ?Sized>(
        selection: &SelectionStore,
        form: &BookingForm,
        config: &WidgetConfig,
        rng: &mut R,
    ) -> Result<Self, InvoiceError> {
        let patient_name = form
            .patient_name
            .clone()
            .ok_or(InvoiceError::MissingInput(InputField::PatientName))?;
        let date = form
            .date
            .clone()
            .ok_or(InvoiceError::MissingInput(InputField::BookingDate))?;
        let payment = form
            .payment
            .clone()
            .ok_or(InvoiceError::MissingInput(InputField::Payment))?;

        let services = selection.joined_names();
        let services_display = truncate_display(&services, config.summary_max_chars).into_owned();
        Ok(Self {
            invoice_id: generate_invoice_id(rng),
            verification_code: generate_verification_code(rng),
            patient_name,
            date,
            payment,
            totals: Totals::compute(selection.total(), config.tax_rate_bps),
            services,
            services_display,
        })
    }

    #[must_use]
    pub const fn stamp(&self) -> PaymentStamp {
        PaymentStamp::for_method(&self.payment)
    }

    /// Write every receipt field and the stamp.
    pub fn render<S: BookingSurface + ?Sized>(&self, surface: &mut S, currency: &str) {
        let code = self.verification_code.to_string();
        let fields = [
            (TextField::InvoiceId, self.invoice_id.clone()),
            (TextField::SummaryInvoiceId, self.invoice_id.clone()),
            (TextField::SummaryName, self.patient_name.clone()),
            (TextField::SummaryService, self.services_display.clone()),
            (TextField::SummaryCode, code),
            (TextField::SummaryDate, self.date.clone()),
            (
                TextField::SummaryPrice,
                format_currency(self.totals.subtotal, currency),
            ),
            (TextField::SummaryTax, format_currency(self.totals.tax, currency)),
            (
                TextField::SummaryTotal,
                format_currency(self.totals.total, currency),
            ),
        ];
        for (field, text) in &fields {
            surface.set_text(*field, text);
        }
        surface.set_stamp(self.stamp());
    }

    /// Wire record for this invoice. Optional patient fields pass through as read.
    #[must_use]
    pub fn to_record(&self, form: &BookingForm) -> BookingRecord {
        BookingRecord {
            id: self.invoice_id.clone(),
            verification_code: self.verification_code,
            patient_name: self.patient_name.clone(),
            patient_email: form.email.clone(),
            patient_phone: form.phone.clone(),
            patient_age: form.age.clone(),
            patient_gender: form.gender.clone(),
            patient_address: form.address.clone(),
            test_type: self.services.clone(),
            price: self.totals.total,
            payment_method: self.payment.clone(),
            date: self.date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn form(payment: PaymentMethod) -> BookingForm {
        BookingForm {
            patient_name: Some("Nimal Perera".into()),
            date: Some("2026-10-18".into()),
            payment: Some(payment),
            ..BookingForm::default()
        }
    }

    #[test]
    fn identifiers_stay_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..500 {
            let id = generate_invoice_id(&mut rng);
            let n: u32 = id.trim_start_matches("#INV-").parse().unwrap();
            assert!(n < INVOICE_NUMBER_SPAN);
            let code = generate_verification_code(&mut rng);
            assert!((VERIFICATION_CODE_MIN..=VERIFICATION_CODE_MAX).contains(&code));
        }
    }

    #[test]
    fn totals_apply_five_percent() {
        let totals = Totals::compute(Money::from_major(4000), 500);
        assert_eq!(totals.tax, Money::from_major(200));
        assert_eq!(totals.total, Money::from_major(4200));
    }

    #[test]
    fn missing_required_inputs_abort() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let selection = SelectionStore::new();
        let config = WidgetConfig::default();
        let mut no_payment = form(PaymentMethod::Cash);
        no_payment.payment = None;
        assert_eq!(
            Invoice::compute(&selection, &no_payment, &config, &mut rng),
            Err(InvoiceError::MissingInput(InputField::Payment))
        );
        let mut no_name = form(PaymentMethod::Cash);
        no_name.patient_name = None;
        assert_eq!(
            Invoice::compute(&selection, &no_name, &config, &mut rng),
            Err(InvoiceError::MissingInput(InputField::PatientName))
        );
    }

    #[test]
    fn record_carries_untruncated_services_and_total() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut selection = SelectionStore::new();
        selection.toggle("Comprehensive Metabolic Panel", Money::from_major(2000));
        selection.toggle("HbA1c", Money::from_major(1000));
        let form = form(PaymentMethod::Card);
        let invoice =
            Invoice::compute(&selection, &form, &WidgetConfig::default(), &mut rng).unwrap();
        assert_eq!(invoice.services, "Comprehensive Metabolic Panel, HbA1c");
        assert_eq!(invoice.services_display, "Comprehensive Metabolic Panel,...");
        let record = invoice.to_record(&form);
        assert_eq!(record.test_type, invoice.services);
        assert_eq!(record.price, Money::from_major(3150));
        assert_eq!(invoice.stamp(), PaymentStamp::Paid);
    }
}
