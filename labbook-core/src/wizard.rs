//! Four-step booking wizard state machine.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Steps of the booking modal, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    Summary = 1,
    Date = 2,
    Payment = 3,
    Receipt = 4,
}

impl WizardStep {
    pub const ALL: [Self; 4] = [Self::Summary, Self::Date, Self::Payment, Self::Receipt];

    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Summary),
            2 => Some(Self::Date),
            3 => Some(Self::Payment),
            4 => Some(Self::Receipt),
            _ => None,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Id of the step container in the page markup.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Summary => "step1",
            Self::Date => "step2",
            Self::Payment => "step3",
            Self::Receipt => "step4",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Summary => "Selected Services",
            Self::Date => "Choose a Date",
            Self::Payment => "Payment Method",
            Self::Receipt => "Booking Receipt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("no services selected")]
    NothingSelected,
    #[error("Please select a date.")]
    MissingDate,
    #[error("the receipt step is reached only by generating an invoice")]
    ReceiptRequiresInvoice,
}

/// Current step plus whether the modal is showing.
///
/// Closing the modal keeps the step; only [`Wizard::open`] resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wizard {
    step: WizardStep,
    open: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Summary,
            open: false,
        }
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.step = WizardStep::Summary;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move forward to `target`. Entering the date step requires a non-empty
    /// date value when the page has a date input (`Some`); the receipt step
    /// cannot be entered this way.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::MissingDate`] when `target` is the date step and
    /// `date_value` is empty, and [`WizardError::ReceiptRequiresInvoice`] for
    /// the receipt step. The step is unchanged on error.
    pub fn advance(
        &mut self,
        target: WizardStep,
        date_value: Option<&str>,
    ) -> Result<WizardStep, WizardError> {
        match (target, date_value) {
            (WizardStep::Receipt, _) => return Err(WizardError::ReceiptRequiresInvoice),
            (WizardStep::Date, Some(value)) if value.trim().is_empty() => {
                return Err(WizardError::MissingDate);
            }
            _ => {}
        }
        self.step = target;
        Ok(self.step)
    }

    /// Move back to `target`. Targets later than the current step are ignored.
    pub fn retreat(&mut self, target: WizardStep) -> WizardStep {
        if target <= self.step {
            self.step = target;
        }
        self.step
    }

    pub(crate) fn complete(&mut self) {
        self.step = WizardStep::Receipt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_roundtrip_and_reject_out_of_range() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(0), None);
        assert_eq!(WizardStep::from_index(5), None);
        assert_eq!(WizardStep::Payment.element_id(), "step3");
    }

    #[test]
    fn empty_date_blocks_date_step() {
        let mut wizard = Wizard::new();
        wizard.open();
        assert_eq!(
            wizard.advance(WizardStep::Date, Some("   ")),
            Err(WizardError::MissingDate)
        );
        assert_eq!(wizard.step(), WizardStep::Summary);
        assert_eq!(wizard.advance(WizardStep::Date, Some("2026-10-18")), Ok(WizardStep::Date));
    }

    #[test]
    fn receipt_needs_invoice() {
        let mut wizard = Wizard::new();
        wizard.open();
        wizard.advance(WizardStep::Payment, Some("2026-10-18")).unwrap();
        assert_eq!(
            wizard.advance(WizardStep::Receipt, Some("2026-10-18")),
            Err(WizardError::ReceiptRequiresInvoice)
        );
        wizard.complete();
        assert_eq!(wizard.step(), WizardStep::Receipt);
    }

    #[test]
    fn retreat_only_goes_back() {
        let mut wizard = Wizard::new();
        wizard.open();
        wizard.advance(WizardStep::Payment, Some("2026-10-18")).unwrap();
        assert_eq!(wizard.retreat(WizardStep::Summary), WizardStep::Summary);
        assert_eq!(wizard.retreat(WizardStep::Payment), WizardStep::Summary);
    }

    #[test]
    fn close_keeps_step_and_open_resets_it() {
        let mut wizard = Wizard::new();
        wizard.open();
        wizard.advance(WizardStep::Date, Some("2026-10-18")).unwrap();
        wizard.close();
        assert!(!wizard.is_open());
        assert_eq!(wizard.step(), WizardStep::Date);
        wizard.open();
        assert_eq!(wizard.step(), WizardStep::Summary);
    }
}
