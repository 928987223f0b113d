//! Booking controller: owns the selection, the wizard and the submission
//! status, and pushes every change to its surface.
use crate::booking::{
    BookingAck, BookingForm, NETWORK_ERROR_NOTICE, Submission, SubmissionFailure,
    SubmissionStatus, SubmissionTicket, SubmitError, server_error_notice,
};
use crate::config::WidgetConfig;
use crate::format::{format_currency, selection_label};
use crate::invoice::{Invoice, InvoiceError};
use crate::money::Money;
use crate::payment::PaymentMethod;
use crate::selection::{SelectionStore, Toggle};
use crate::surface::{BookingSurface, InputField, Region, SummaryLine, TextField};
use crate::wizard::{Wizard, WizardError, WizardStep};
use chrono::NaiveDate;
use rand::Rng;

pub struct BookingController<S: BookingSurface> {
    config: WidgetConfig,
    selection: SelectionStore,
    wizard: Wizard,
    submission: SubmissionStatus,
    tickets_issued: u64,
    invoice: Option<Invoice>,
    surface: S,
}

impl<S: BookingSurface> BookingController<S> {
    pub fn new(config: WidgetConfig, surface: S) -> Self {
        Self {
            config,
            selection: SelectionStore::new(),
            wizard: Wizard::new(),
            submission: SubmissionStatus::Idle,
            tickets_issued: 0,
            invoice: None,
            surface,
        }
    }

    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub const fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub const fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub const fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub const fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// The most recently generated invoice.
    pub const fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn money(&self, amount: Money) -> String {
        format_currency(amount, &self.config.currency)
    }

    /// Select or deselect a service card and refresh the floating bar.
    pub fn toggle_service(&mut self, name: &str, price: Money) -> Toggle {
        let outcome = self.selection.toggle(name, price);
        self.surface.mark_service(name, outcome.is_selected());
        self.refresh_floating_bar();
        outcome
    }

    fn refresh_floating_bar(&mut self) {
        let count = self.selection.count();
        if count == 0 {
            self.surface.set_visible(Region::FloatingBar, false);
            return;
        }
        let total = self.money(self.selection.total());
        self.surface.set_visible(Region::FloatingBar, true);
        self.surface
            .set_text(TextField::SelectedCount, &selection_label(count));
        self.surface.set_text(TextField::SelectedTotal, &total);
    }

    /// Open the wizard at the summary step with the date defaulted to `today`.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NothingSelected`] and leaves everything as it was
    /// when no service is selected.
    pub fn open_booking(&mut self, today: NaiveDate) -> Result<(), WizardError> {
        if self.selection.is_empty() {
            return Err(WizardError::NothingSelected);
        }
        self.wizard.open();
        self.surface.show_step(WizardStep::Summary);
        self.surface.set_input(
            InputField::BookingDate,
            &today.format("%Y-%m-%d").to_string(),
        );

        let lines: Vec<SummaryLine> = self
            .selection
            .iter()
            .map(|entry| SummaryLine {
                name: entry.name.clone(),
                price_text: self.money(entry.price),
            })
            .collect();
        self.surface.render_summary(&lines);
        let total = self.money(self.selection.total());
        self.surface.set_text(TextField::ModalTotal, &total);
        self.surface.set_visible(Region::Modal, true);
        log::debug!("booking opened with {} services", lines.len());
        Ok(())
    }

    /// Hide the modal. The step and the selection are kept.
    pub fn close_booking(&mut self) {
        self.wizard.close();
        self.surface.set_visible(Region::Modal, false);
    }

    /// Forward navigation. An empty date blocks the date step and notifies the visitor.
    ///
    /// # Errors
    ///
    /// Returns the rejected transition; the step is unchanged.
    pub fn advance(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        let date = self.surface.input(InputField::BookingDate);
        match self.wizard.advance(target, date.as_deref()) {
            Ok(step) => {
                self.surface.show_step(step);
                Ok(step)
            }
            Err(err) => {
                if err == WizardError::MissingDate {
                    self.surface.notify(&err.to_string());
                }
                log::debug!("advance to step {} rejected: {err}", target.index());
                Err(err)
            }
        }
    }

    /// Unconditional back navigation.
    pub fn retreat(&mut self, target: WizardStep) -> WizardStep {
        let step = self.wizard.retreat(target);
        self.surface.show_step(step);
        step
    }

    /// Mark `method` as the only selected payment option; card details are
    /// shown only for card payments.
    pub fn select_payment(&mut self, method: &PaymentMethod) {
        self.surface.mark_payment(method);
        self.surface
            .set_visible(Region::CardDetails, method.is_card());
    }

    /// Compute and render the invoice, move to the receipt step and return the
    /// record to post with a fresh ticket. The receipt is shown before the
    /// backend answers; the status stays pending until
    /// [`Self::resolve_submission`] is called with that ticket.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::MissingInput`] without touching any state when
    /// the name, date or payment input is absent.
    pub fn generate_invoice<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Submission, InvoiceError> {
        let form = BookingForm::read(&self.surface);
        let invoice = Invoice::compute(&self.selection, &form, &self.config, rng).inspect_err(
            |err| log::debug!("invoice generation aborted: {err}"),
        )?;

        invoice.render(&mut self.surface, &self.config.currency);
        let record = invoice.to_record(&form);
        self.tickets_issued += 1;
        let ticket = SubmissionTicket(self.tickets_issued);
        self.submission = SubmissionStatus::Pending {
            ticket,
            invoice_id: invoice.invoice_id.clone(),
        };
        self.surface.set_submission(&self.submission);
        self.wizard.complete();
        self.surface.show_step(WizardStep::Receipt);
        self.invoice = Some(invoice);
        Ok(Submission { ticket, record })
    }

    /// Reconcile the submission identified by `ticket` with the backend outcome.
    /// Outcomes for a superseded submission are dropped, even when its invoice
    /// id happens to match the current one.
    pub fn resolve_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<BookingAck, SubmitError>,
    ) -> &SubmissionStatus {
        let invoice_id = match &self.submission {
            SubmissionStatus::Pending {
                ticket: pending,
                invoice_id,
            } if *pending == ticket => invoice_id.clone(),
            _ => {
                log::debug!("ignoring stale acknowledgement for {ticket}");
                return &self.submission;
            }
        };
        self.submission = match outcome {
            Ok(ack) if ack.is_success() => {
                log::info!("booking {invoice_id} saved");
                SubmissionStatus::Confirmed { ticket, invoice_id }
            }
            Ok(ack) => {
                let message = ack.message.unwrap_or_else(|| "Unknown error".to_string());
                log::warn!("booking {invoice_id} rejected: {message}");
                self.surface.notify(&server_error_notice(&message));
                SubmissionStatus::Failed {
                    ticket,
                    invoice_id,
                    reason: SubmissionFailure::Rejected(message),
                }
            }
            Err(err) => {
                log::error!("booking {invoice_id} not delivered: {err}");
                self.surface.notify(NETWORK_ERROR_NOTICE);
                SubmissionStatus::Failed {
                    ticket,
                    invoice_id,
                    reason: SubmissionFailure::Network(err.to_string()),
                }
            }
        };
        self.surface.set_submission(&self.submission);
        &self.submission
    }
}
