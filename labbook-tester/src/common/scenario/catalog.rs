use anyhow::{Result, ensure};
use labbook_core::{
    BookingAck, BookingSurface, InputField, MemorySurface, Money, NETWORK_ERROR_NOTICE,
    PaymentMethod, PaymentStamp, Region, Submission, SubmissionFailure, SubmissionStatus,
    SubmitError, TextField, WizardError, WizardStep, format_currency, server_error_notice,
};
use rand::Rng;
use regex::Regex;
use std::collections::BTreeMap;

use super::LogicScenario;
use crate::logic::BookingRun;

const TOGGLES_PER_RUN: usize = 120;

const INVOICE_ID_PATTERN: &str = r"^#INV-\d{1,4}$";

pub fn catalog_scenarios() -> Vec<LogicScenario> {
    vec![
        LogicScenario::new(
            "selection-parity",
            "Selection Parity",
            "Random toggles keep exactly the odd-toggled services",
            selection_parity,
        ),
        LogicScenario::new(
            "cash-booking",
            "Cash Booking",
            "CBC + Lipid Profile paid at the lab: 4,000 / 200 / 4,200",
            cash_booking,
        ),
        LogicScenario::new(
            "card-booking",
            "Card Booking",
            "X-Ray paid by card: 3,000 / 150 / 3,150 with card details shown",
            card_booking,
        ),
        LogicScenario::new(
            "random-checkout",
            "Random Checkout",
            "Random services and payment produce consistent invoices",
            random_checkout,
        ),
        LogicScenario::new(
            "summary-truncation",
            "Summary Truncation",
            "Long service lists are cut on screen but sent in full",
            summary_truncation,
        ),
        LogicScenario::new(
            "back-navigation",
            "Back Navigation",
            "Going back keeps the selection and the entered date",
            back_navigation,
        ),
        LogicScenario::new(
            "empty-date",
            "Empty Date",
            "A cleared date blocks the date step",
            empty_date,
        ),
        LogicScenario::new(
            "closed-when-empty",
            "Closed When Empty",
            "The wizard never opens without a selected service",
            closed_when_empty,
        ),
        LogicScenario::new(
            "server-rejection",
            "Server Rejection",
            "A rejected booking keeps the receipt and reports the message",
            server_rejection,
        ),
        LogicScenario::new(
            "network-failure",
            "Network Failure",
            "An unreachable backend keeps the receipt and warns the visitor",
            network_failure,
        ),
        LogicScenario::new(
            "stale-acknowledgement",
            "Stale Acknowledgement",
            "Late answers for a replaced booking are ignored",
            stale_acknowledgement,
        ),
    ]
}

pub fn find_catalog_scenario(key: &str) -> Option<LogicScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key() == key)
}

fn expect_text(surface: &MemorySurface, field: TextField, expected: &str) -> Result<()> {
    let actual = surface.text(field);
    ensure!(
        actual == Some(expected),
        "#{} shows {actual:?}, expected {expected:?}",
        field.element_id()
    );
    Ok(())
}

fn expect_notice(surface: &MemorySurface, expected: &str) -> Result<()> {
    ensure!(
        surface.notices().iter().any(|notice| notice == expected),
        "missing notice {expected:?}; got {:?}",
        surface.notices()
    );
    Ok(())
}

fn money_text(run: &BookingRun, major: i64) -> String {
    format_currency(Money::from_major(major), &run.config().currency)
}

pub(crate) fn selection_parity(run: &mut BookingRun) -> Result<()> {
    let services = run.catalog().to_vec();
    ensure!(!services.is_empty(), "catalog is empty");
    let mut expected: BTreeMap<String, Money> = BTreeMap::new();

    for toggle in 0..TOGGLES_PER_RUN {
        let service = &services[run.rng.gen_range(0..services.len())];
        // Vary the price so the most recent toggle-on price is observable.
        let price = Money::from_cents(run.rng.gen_range(1..1_000_000));
        run.controller.toggle_service(&service.name, price);
        if expected.remove(&service.name).is_none() {
            expected.insert(service.name.clone(), price);
        }

        let selection = run.controller.selection();
        ensure!(
            selection.count() == expected.len(),
            "toggle {toggle}: count {} != {}",
            selection.count(),
            expected.len()
        );
        let total: Money = expected.values().sum();
        ensure!(
            selection.total() == total,
            "toggle {toggle}: total {:?} != {total:?}",
            selection.total()
        );
        ensure!(
            run.surface().is_visible(Region::FloatingBar) == !expected.is_empty(),
            "toggle {toggle}: floating bar visibility out of sync"
        );
    }

    for (name, price) in &expected {
        ensure!(
            run.controller.selection().price_of(name) == Some(*price),
            "{name} lost its latest price"
        );
        ensure!(run.surface().is_service_marked(name), "{name} card not marked");
    }
    Ok(())
}

pub(crate) fn cash_booking(run: &mut BookingRun) -> Result<()> {
    run.controller.toggle_service("CBC", Money::from_major(1500));
    run.controller
        .toggle_service("Lipid Profile", Money::from_major(2500));
    expect_text(run.surface(), TextField::SelectedCount, "2 Services Selected")?;

    let record = run.checkout(&PaymentMethod::Cash)?.record;
    let surface = run.surface();
    expect_text(surface, TextField::SummaryPrice, &money_text(run, 4000))?;
    expect_text(surface, TextField::SummaryTax, &money_text(run, 200))?;
    expect_text(surface, TextField::SummaryTotal, &money_text(run, 4200))?;
    ensure!(surface.stamp() == Some(PaymentStamp::PayAtLab), "stamp {:?}", surface.stamp());
    ensure!(!surface.is_visible(Region::CardDetails), "card details shown for cash");
    ensure!(record.price == Money::from_major(4200), "posted {:?}", record.price);
    ensure!(record.test_type == "CBC, Lipid Profile", "testType {}", record.test_type);
    ensure!(record.payment_method == PaymentMethod::Cash);
    ensure!(
        run.controller.submission().is_pending(),
        "submission should wait for the backend"
    );
    Ok(())
}

pub(crate) fn card_booking(run: &mut BookingRun) -> Result<()> {
    run.controller.toggle_service("X-Ray", Money::from_major(3000));
    let record = run.checkout(&PaymentMethod::Card)?.record;
    let surface = run.surface();
    ensure!(surface.is_visible(Region::CardDetails), "card details hidden");
    expect_text(surface, TextField::SummaryTax, &money_text(run, 150))?;
    expect_text(surface, TextField::SummaryTotal, &money_text(run, 3150))?;
    ensure!(surface.stamp() == Some(PaymentStamp::Paid), "stamp {:?}", surface.stamp());
    ensure!(record.price == Money::from_major(3150), "posted {:?}", record.price);
    Ok(())
}

pub(crate) fn random_checkout(run: &mut BookingRun) -> Result<()> {
    let available = run.catalog().len();
    ensure!(available > 0, "catalog is empty");
    let count = run.rng.gen_range(1..=available);
    let services = run.pick_services(count);
    run.select(&services);
    let offered = PaymentMethod::OFFERED;
    let method = offered[run.rng.gen_range(0..offered.len())].clone();

    let record = run.checkout(&method)?.record;
    let invoice_id = Regex::new(INVOICE_ID_PATTERN)?;
    ensure!(invoice_id.is_match(&record.id), "invoice id {}", record.id);
    ensure!(
        (1000..=9999).contains(&record.verification_code),
        "verification code {}",
        record.verification_code
    );
    expect_text(run.surface(), TextField::InvoiceId, &record.id)?;

    let joined = services
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    ensure!(record.test_type == joined, "testType {}", record.test_type);

    let subtotal: Money = services.iter().map(|s| s.price).sum();
    let rate = i64::from(run.config().tax_rate_bps);
    let exact_tax = subtotal.cents() * rate;
    let tax = record.price.cents() - subtotal.cents();
    ensure!(
        (tax * 10_000 - exact_tax).abs() <= 5_000,
        "tax {tax} cents on {} at {rate} bps",
        subtotal.cents()
    );
    expect_text(
        run.surface(),
        TextField::SummaryTotal,
        &format_currency(record.price, &run.config().currency),
    )?;
    let stamp = PaymentStamp::for_method(&method);
    ensure!(run.surface().stamp() == Some(stamp), "stamp {:?}", run.surface().stamp());
    Ok(())
}

pub(crate) fn summary_truncation(run: &mut BookingRun) -> Result<()> {
    let limit = run.config().summary_max_chars;
    let services = run.pick_services(usize::MAX);
    let mut chosen = Vec::new();
    let mut joined = String::new();
    for service in services {
        if !joined.is_empty() {
            joined.push_str(", ");
        }
        joined.push_str(&service.name);
        chosen.push(service);
        if joined.chars().count() > limit {
            break;
        }
    }
    run.select(&chosen);

    let record = run.checkout(&PaymentMethod::Cash)?.record;
    let expected = if joined.chars().count() > limit {
        format!("{}...", joined.chars().take(limit).collect::<String>())
    } else {
        joined.clone()
    };
    expect_text(run.surface(), TextField::SummaryService, &expected)?;
    ensure!(record.test_type == joined, "testType was cut: {}", record.test_type);
    Ok(())
}

pub(crate) fn back_navigation(run: &mut BookingRun) -> Result<()> {
    let count = run.rng.gen_range(1..=3);
    let services = run.pick_services(count);
    run.select(&services);
    run.open()?;
    run.controller.advance(WizardStep::Date)?;
    run.fill_patient();
    run.controller.advance(WizardStep::Payment)?;

    let landed = run.controller.retreat(WizardStep::Summary);
    ensure!(landed == WizardStep::Summary, "landed on {landed:?}");
    ensure!(
        run.surface().active_step() == Some(WizardStep::Summary),
        "page shows {:?}",
        run.surface().active_step()
    );
    ensure!(
        run.controller.selection().count() == services.len(),
        "selection changed while going back"
    );
    for service in &services {
        ensure!(run.surface().is_service_marked(&service.name), "{} unmarked", service.name);
    }

    // The date entered on the way forward still satisfies the date step.
    run.controller.advance(WizardStep::Date)?;
    run.controller.advance(WizardStep::Payment)?;
    ensure!(run.controller.retreat(WizardStep::Date) == WizardStep::Date);
    Ok(())
}

pub(crate) fn empty_date(run: &mut BookingRun) -> Result<()> {
    let services = run.pick_services(1);
    run.select(&services);
    run.open()?;
    let blank = if run.rng.gen_bool(0.5) { "" } else { "   " };
    run.controller
        .surface_mut()
        .set_input(InputField::BookingDate, blank);

    let outcome = run.controller.advance(WizardStep::Date);
    ensure!(outcome == Err(WizardError::MissingDate), "advance gave {outcome:?}");
    ensure!(run.controller.step() == WizardStep::Summary, "step moved");
    ensure!(
        run.surface().active_step() == Some(WizardStep::Summary),
        "page left the summary step"
    );
    expect_notice(run.surface(), "Please select a date.")
}

pub(crate) fn closed_when_empty(run: &mut BookingRun) -> Result<()> {
    let before = run.surface().clone();
    ensure!(run.open() == Err(WizardError::NothingSelected), "opened with nothing selected");
    ensure!(run.surface() == &before, "page changed on a refused open");

    let services = run.pick_services(1);
    run.select(&services);
    run.select(&services);
    ensure!(run.controller.selection().is_empty(), "double toggle left a selection");
    ensure!(!run.surface().is_visible(Region::FloatingBar), "bar still shown");
    ensure!(run.open() == Err(WizardError::NothingSelected), "opened after deselecting");
    ensure!(!run.controller.wizard().is_open(), "wizard open");
    ensure!(!run.surface().is_visible(Region::Modal), "modal shown");
    Ok(())
}

pub(crate) fn server_rejection(run: &mut BookingRun) -> Result<()> {
    let services = run.pick_services(2);
    run.select(&services);
    let submission = run.checkout(&PaymentMethod::Cash)?;
    let status = run
        .controller
        .resolve_submission(
            submission.ticket,
            Ok(BookingAck {
                status: "error".to_string(),
                message: Some("Slot unavailable".to_string()),
            }),
        )
        .clone();
    ensure!(
        status
            == SubmissionStatus::Failed {
                ticket: submission.ticket,
                invoice_id: submission.record.id.clone(),
                reason: SubmissionFailure::Rejected("Slot unavailable".to_string()),
            },
        "status {status:?}"
    );
    expect_notice(run.surface(), &server_error_notice("Slot unavailable"))?;
    ensure!(run.controller.step() == WizardStep::Receipt, "receipt withdrawn");
    ensure!(run.surface().stamp().is_some(), "stamp cleared");

    // No message from the backend.
    run.reset();
    run.select(&services);
    let submission = run.checkout(&PaymentMethod::Card)?;
    run.controller.resolve_submission(
        submission.ticket,
        Ok(BookingAck {
            status: "failed".to_string(),
            message: None,
        }),
    );
    expect_notice(run.surface(), &server_error_notice("Unknown error"))
}

pub(crate) fn network_failure(run: &mut BookingRun) -> Result<()> {
    let services = run.pick_services(1);
    run.select(&services);
    let Submission { ticket, record } = run.checkout(&PaymentMethod::Card)?;
    let outcome = if run.rng.gen_bool(0.5) {
        SubmitError::Transport("connection refused".to_string())
    } else {
        SubmitError::Malformed("expected value at line 1 column 1".to_string())
    };
    let status = run
        .controller
        .resolve_submission(ticket, Err(outcome))
        .clone();
    ensure!(
        matches!(
            &status,
            SubmissionStatus::Failed {
                reason: SubmissionFailure::Network(_),
                invoice_id,
                ..
            } if *invoice_id == record.id
        ),
        "status {status:?}"
    );
    expect_notice(run.surface(), NETWORK_ERROR_NOTICE)?;
    expect_text(run.surface(), TextField::InvoiceId, &record.id)
}

pub(crate) fn stale_acknowledgement(run: &mut BookingRun) -> Result<()> {
    let services = run.pick_services(1);
    run.select(&services);
    let first = run.checkout(&PaymentMethod::Cash)?;
    run.controller.close_booking();
    let second = run.checkout(&PaymentMethod::Card)?;
    let success = || BookingAck {
        status: "success".to_string(),
        message: None,
    };

    ensure!(first.ticket != second.ticket, "ticket reused: {}", first.ticket);
    run.controller.resolve_submission(first.ticket, Ok(success()));
    ensure!(
        run.controller.submission()
            == &SubmissionStatus::Pending {
                ticket: second.ticket,
                invoice_id: second.record.id.clone(),
            },
        "stale answer changed {:?}",
        run.controller.submission()
    );
    run.controller.resolve_submission(second.ticket, Ok(success()));
    ensure!(
        run.controller.submission()
            == &SubmissionStatus::Confirmed {
                ticket: second.ticket,
                invoice_id: second.record.id.clone(),
            },
        "status {:?}",
        run.controller.submission()
    );
    ensure!(run.surface().notices().is_empty(), "unexpected notices");
    Ok(())
}
