use std::collections::BTreeMap;

use chrono::NaiveDate;
use labbook_core::surface::InputField;
use labbook_core::{
    BookingAck, BookingController, BookingSurface, MemorySurface, Money, PaymentMethod,
    PaymentStamp, Region, SubmissionStatus, SubmitError, TextField, WidgetConfig, WizardError,
    WizardStep,
};
use rand::rngs::mock::StepRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use regex::Regex;

const NAMES: [&str; 5] = ["CBC", "Lipid Profile", "X-Ray", "HbA1c", "Thyroid Panel"];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn controller() -> BookingController<MemorySurface> {
    BookingController::new(WidgetConfig::default(), MemorySurface::with_form())
}

fn fill_patient(controller: &mut BookingController<MemorySurface>, name: &str) {
    controller
        .surface_mut()
        .set_input(InputField::PatientName, name);
}

#[test]
fn random_toggle_sequences_keep_odd_counted_names() {
    for seed in [1_u64, 7, 42, 0xC0FFEE] {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut controller = controller();
        let mut expected: BTreeMap<&str, Money> = BTreeMap::new();

        for _ in 0..200 {
            let name = NAMES[rng.gen_range(0..NAMES.len())];
            let price = Money::from_major(rng.gen_range(100..5000));
            controller.toggle_service(name, price);
            if expected.remove(name).is_none() {
                expected.insert(name, price);
            }

            let selection = controller.selection();
            assert_eq!(selection.count(), expected.len(), "seed {seed}");
            assert_eq!(selection.total(), expected.values().sum::<Money>());
            assert_eq!(
                controller.surface().is_visible(Region::FloatingBar),
                selection.count() > 0
            );
        }

        for (name, price) in &expected {
            assert_eq!(controller.selection().price_of(name), Some(*price));
            assert!(controller.surface().is_service_marked(name));
        }
    }
}

#[test]
fn cash_booking_end_to_end() {
    let mut controller = controller();
    controller.toggle_service("CBC", Money::from_major(1500));
    controller.toggle_service("Lipid Profile", Money::from_major(2500));
    assert_eq!(
        controller.surface().text(TextField::SelectedCount),
        Some("2 Services Selected")
    );
    assert_eq!(
        controller.surface().text(TextField::SelectedTotal),
        Some("LKR 4,000")
    );

    controller.open_booking(today()).unwrap();
    assert_eq!(controller.surface().active_step(), Some(WizardStep::Summary));
    assert_eq!(
        controller.surface().input_value(InputField::BookingDate),
        Some("2026-10-18")
    );
    controller.advance(WizardStep::Date).unwrap();
    fill_patient(&mut controller, "Nimal Perera");
    controller.advance(WizardStep::Payment).unwrap();
    controller.select_payment(&PaymentMethod::Cash);
    assert!(!controller.surface().is_visible(Region::CardDetails));

    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let record = controller.generate_invoice(&mut rng).unwrap().record;
    assert_eq!(controller.step(), WizardStep::Receipt);
    assert_eq!(record.price, Money::from_major(4200));
    assert_eq!(record.test_type, "CBC, Lipid Profile");

    let surface = controller.surface();
    assert_eq!(surface.text(TextField::SummaryPrice), Some("LKR 4,000"));
    assert_eq!(surface.text(TextField::SummaryTax), Some("LKR 200"));
    assert_eq!(surface.text(TextField::SummaryTotal), Some("LKR 4,200"));
    assert_eq!(surface.stamp(), Some(PaymentStamp::PayAtLab));

    let id = Regex::new(r"^#INV-\d{1,4}$").unwrap();
    assert!(id.is_match(&record.id), "unexpected id {}", record.id);
    assert_eq!(surface.text(TextField::InvoiceId), Some(record.id.as_str()));
    assert!((1000..=9999).contains(&record.verification_code));
}

#[test]
fn card_booking_end_to_end() {
    let mut controller = controller();
    controller.toggle_service("X-Ray", Money::from_major(3000));
    controller.open_booking(today()).unwrap();
    controller.advance(WizardStep::Date).unwrap();
    fill_patient(&mut controller, "Amaya Silva");
    controller.advance(WizardStep::Payment).unwrap();
    controller.select_payment(&PaymentMethod::Card);
    assert!(controller.surface().is_visible(Region::CardDetails));

    let mut rng = ChaCha20Rng::seed_from_u64(12);
    let record = controller.generate_invoice(&mut rng).unwrap().record;
    assert_eq!(record.price, Money::from_major(3150));
    assert_eq!(
        controller.surface().text(TextField::SummaryTax),
        Some("LKR 150")
    );
    assert_eq!(controller.surface().stamp(), Some(PaymentStamp::Paid));
}

#[test]
fn empty_selection_never_opens() {
    let mut controller = controller();
    let before = controller.surface().clone();
    assert_eq!(
        controller.open_booking(today()),
        Err(WizardError::NothingSelected)
    );
    assert_eq!(controller.surface(), &before);
    assert!(!controller.wizard().is_open());
}

#[test]
fn cleared_date_keeps_summary_step() {
    let mut controller = controller();
    controller.toggle_service("CBC", Money::from_major(1500));
    controller.open_booking(today()).unwrap();
    controller
        .surface_mut()
        .set_input(InputField::BookingDate, "");
    assert_eq!(
        controller.advance(WizardStep::Date),
        Err(WizardError::MissingDate)
    );
    assert_eq!(controller.step(), WizardStep::Summary);
    assert_eq!(controller.surface().notices(), ["Please select a date."]);
}

#[test]
fn back_navigation_keeps_selection() {
    let mut controller = controller();
    controller.toggle_service("CBC", Money::from_major(1500));
    controller.toggle_service("X-Ray", Money::from_major(3000));
    controller.open_booking(today()).unwrap();
    controller.advance(WizardStep::Date).unwrap();
    controller.advance(WizardStep::Payment).unwrap();
    assert_eq!(controller.retreat(WizardStep::Summary), WizardStep::Summary);
    assert_eq!(controller.selection().count(), 2);
    assert_eq!(controller.surface().active_step(), Some(WizardStep::Summary));
}

#[test]
fn stale_ack_leaves_newer_submission_pending() {
    let mut controller = controller();
    controller.toggle_service("CBC", Money::from_major(1500));
    controller.open_booking(today()).unwrap();
    fill_patient(&mut controller, "Kasun");
    controller.select_payment(&PaymentMethod::Cash);

    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let first = controller.generate_invoice(&mut rng).unwrap();
    controller.open_booking(today()).unwrap();
    controller.select_payment(&PaymentMethod::Cash);
    let second = controller.generate_invoice(&mut rng).unwrap();

    let ack = BookingAck {
        status: "success".into(),
        message: None,
    };
    controller.resolve_submission(first.ticket, Ok(ack));
    assert!(controller.submission().is_pending());

    controller.resolve_submission(second.ticket, Err(SubmitError::Transport("offline".into())));
    assert!(matches!(
        controller.submission(),
        SubmissionStatus::Failed { ticket, invoice_id, .. }
            if *ticket == second.ticket && *invoice_id == second.record.id
    ));
    assert_eq!(controller.surface().stamp(), Some(PaymentStamp::PayAtLab));
}

#[test]
fn late_ack_with_same_invoice_id_is_ignored() {
    let mut controller = controller();
    controller.toggle_service("X-Ray", Money::from_major(3000));
    controller.open_booking(today()).unwrap();
    fill_patient(&mut controller, "Kasun");
    controller.select_payment(&PaymentMethod::Card);

    // A constant generator makes both bookings draw #INV-0.
    let mut rng = StepRng::new(0, 0);
    let first = controller.generate_invoice(&mut rng).unwrap();
    controller.open_booking(today()).unwrap();
    let second = controller.generate_invoice(&mut rng).unwrap();
    assert_eq!(first.record.id, "#INV-0");
    assert_eq!(second.record.id, first.record.id);

    controller.resolve_submission(first.ticket, Err(SubmitError::Transport("late".into())));
    assert!(controller.submission().is_pending());
    assert_eq!(controller.submission().ticket(), Some(second.ticket));
    assert!(controller.surface().notices().is_empty());

    let ack = BookingAck {
        status: "success".into(),
        message: None,
    };
    controller.resolve_submission(second.ticket, Ok(ack));
    assert!(matches!(
        controller.submission(),
        SubmissionStatus::Confirmed { ticket, .. } if *ticket == second.ticket
    ));
}
