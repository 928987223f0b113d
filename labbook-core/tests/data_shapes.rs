use std::collections::HashSet;

use labbook_core::{BookingRecord, Money, PaymentMethod, ServiceCatalog, WidgetConfig};
use serde_json::{Value, json};

const SERVICES_JSON: &str = include_str!("../../labbook-web/static/assets/data/services.json");
const WIDGET_JSON: &str = include_str!("../../labbook-web/static/assets/data/widget.json");

#[test]
fn shipped_catalog_is_valid() {
    let catalog = ServiceCatalog::from_json(SERVICES_JSON).unwrap();
    assert!(!catalog.is_empty());
    let names: HashSet<&str> = catalog.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), catalog.len());
    for service in &catalog.services {
        assert!(!service.price.is_negative(), "{}", service.name);
        assert!(!service.category.is_empty(), "{} has no category", service.name);
    }
}

#[test]
fn shipped_config_matches_defaults() {
    let config = WidgetConfig::from_json(WIDGET_JSON).unwrap();
    assert_eq!(config, WidgetConfig::default());
}

#[test]
fn booking_record_wire_shape() {
    let record = BookingRecord {
        id: "#INV-42".into(),
        verification_code: 4821,
        patient_name: "Nimal".into(),
        patient_email: Some("nimal@example.com".into()),
        patient_phone: None,
        patient_age: Some("34".into()),
        patient_gender: None,
        patient_address: None,
        test_type: "CBC, Lipid Profile".into(),
        price: Money::from_major(4200),
        payment_method: PaymentMethod::Cash,
        date: "2026-10-18".into(),
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "#INV-42",
            "verificationCode": 4821,
            "patientName": "Nimal",
            "patientEmail": "nimal@example.com",
            "patientAge": "34",
            "testType": "CBC, Lipid Profile",
            "price": 4200,
            "paymentMethod": "cash",
            "date": "2026-10-18"
        })
    );
}

#[test]
fn fractional_total_is_sent_as_number() {
    let record = BookingRecord {
        id: "#INV-7".into(),
        verification_code: 1000,
        patient_name: "A".into(),
        patient_email: None,
        patient_phone: None,
        patient_age: None,
        patient_gender: None,
        patient_address: None,
        test_type: "Urine Full Report".into(),
        price: Money::from_cents(47_250),
        payment_method: PaymentMethod::Card,
        date: "2026-10-18".into(),
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["price"], Value::from(472.5));
    assert_eq!(value["paymentMethod"], "card");
}
