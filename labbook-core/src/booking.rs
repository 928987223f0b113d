//! Booking draft, wire record, acknowledgement and submission status.
use crate::payment::PaymentMethod;
use crate::surface::{BookingSurface, InputField};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Alert shown when the backend answers with a non-success status.
#[must_use]
pub fn server_error_notice(message: &str) -> String {
    format!("Server Error: {message}\n\nPlease show receipt at lab.")
}

/// Alert shown when the request never produced a readable acknowledgement.
pub const NETWORK_ERROR_NOTICE: &str =
    "Network Error: Could not connect to server. Please ensure XAMPP is running.";

/// Form values assembled at submission time. `None` means the input is not on
/// the page, which is different from an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub patient_name: Option<String>,
    pub date: Option<String>,
    pub payment: Option<PaymentMethod>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

impl BookingForm {
    /// Read every booking input from the surface.
    pub fn read<S: BookingSurface + ?Sized>(surface: &S) -> Self {
        Self {
            patient_name: surface.input(InputField::PatientName),
            date: surface.input(InputField::BookingDate),
            payment: surface
                .input(InputField::Payment)
                .filter(|value| !value.is_empty())
                .map(PaymentMethod::from),
            email: surface.input(InputField::PatientEmail),
            phone: surface.input(InputField::PatientPhone),
            age: surface.input(InputField::PatientAge),
            gender: surface.input(InputField::PatientGender),
            address: surface.input(InputField::PatientAddress),
        }
    }
}

/// Record posted to the booking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub verification_code: u16,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_address: Option<String>,
    /// Every selected service, comma joined, never truncated.
    pub test_type: String,
    /// Final total including tax, in whole currency units.
    pub price: crate::money::Money,
    pub payment_method: PaymentMethod,
    /// `YYYY-MM-DD` as typed in the date input.
    pub date: String,
}

/// JSON acknowledgement returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingAck {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl BookingAck {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Transport-level failure of the single submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unreadable acknowledgement: {0}")]
    Malformed(String),
}

/// Why a submission did not reach the confirmed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionFailure {
    /// The backend answered with a non-success status and this message.
    Rejected(String),
    /// No acknowledgement could be read.
    Network(String),
}

/// Identifies one `generate_invoice` call. Invoice ids may repeat, tickets do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionTicket(pub u64);

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission {}", self.0)
    }
}

/// A booking ready to post, plus the ticket to hand back with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub record: BookingRecord,
}

/// Lifecycle of the booking request bound to the receipt view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending {
        ticket: SubmissionTicket,
        invoice_id: String,
    },
    Confirmed {
        ticket: SubmissionTicket,
        invoice_id: String,
    },
    Failed {
        ticket: SubmissionTicket,
        invoice_id: String,
        reason: SubmissionFailure,
    },
}

impl SubmissionStatus {
    #[must_use]
    pub fn invoice_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { invoice_id, .. }
            | Self::Confirmed { invoice_id, .. }
            | Self::Failed { invoice_id, .. } => Some(invoice_id),
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> Option<SubmissionTicket> {
        match self {
            Self::Idle => None,
            Self::Pending { ticket, .. }
            | Self::Confirmed { ticket, .. }
            | Self::Failed { ticket, .. } => Some(*ticket),
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Short status line printed under the receipt.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Pending { .. } => "Awaiting confirmation from the lab...".to_string(),
            Self::Confirmed { .. } => "Booking confirmed".to_string(),
            Self::Failed {
                reason: SubmissionFailure::Rejected(message),
                ..
            } => format!("Not confirmed: {message}"),
            Self::Failed {
                reason: SubmissionFailure::Network(_),
                ..
            } => "Not confirmed: the lab could not be reached".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::surface::MemorySurface;

    #[test]
    fn record_uses_camel_case_and_omits_missing_fields() {
        let record = BookingRecord {
            id: "#INV-42".into(),
            verification_code: 1234,
            patient_name: "Nimal".into(),
            patient_email: Some("n@example.com".into()),
            patient_phone: None,
            patient_age: None,
            patient_gender: None,
            patient_address: None,
            test_type: "CBC, Lipid Profile".into(),
            price: Money::from_major(4200),
            payment_method: PaymentMethod::Cash,
            date: "2026-10-18".into(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["verificationCode"], 1234);
        assert_eq!(value["patientEmail"], "n@example.com");
        assert_eq!(value["testType"], "CBC, Lipid Profile");
        assert_eq!(value["price"], 4200);
        assert_eq!(value["paymentMethod"], "cash");
        assert!(value.get("patientPhone").is_none());
    }

    #[test]
    fn ack_parses_with_and_without_message() {
        let ok: BookingAck = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(ok.is_success());
        let err: BookingAck =
            serde_json::from_str(r#"{"status":"error","message":"Duplicate"}"#).unwrap();
        assert!(!err.is_success());
        assert_eq!(err.message.as_deref(), Some("Duplicate"));
    }

    #[test]
    fn form_reads_missing_and_empty_inputs_differently() {
        let mut surface = MemorySurface::with_form();
        surface.remove_input(InputField::PatientAddress);
        let form = BookingForm::read(&surface);
        assert_eq!(form.patient_name.as_deref(), Some(""));
        assert_eq!(form.address, None);
        assert_eq!(form.payment, None);
    }

    #[test]
    fn status_labels_and_ids() {
        let pending = SubmissionStatus::Pending {
            ticket: SubmissionTicket(3),
            invoice_id: "#INV-1".into(),
        };
        assert!(pending.is_pending());
        assert_eq!(pending.invoice_id(), Some("#INV-1"));
        assert_eq!(pending.ticket(), Some(SubmissionTicket(3)));
        let failed = SubmissionStatus::Failed {
            ticket: SubmissionTicket(3),
            invoice_id: "#INV-1".into(),
            reason: SubmissionFailure::Rejected("Duplicate".into()),
        };
        assert_eq!(failed.label(), "Not confirmed: Duplicate");
        assert_eq!(SubmissionStatus::Idle.invoice_id(), None);
        assert_eq!(SubmissionStatus::Idle.ticket(), None);
        assert_eq!(
            server_error_notice("Duplicate"),
            "Server Error: Duplicate\n\nPlease show receipt at lab."
        );
    }
}
