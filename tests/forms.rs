use rust_decimal::Decimal;

use axum_courier_api::dto::addresses::NewAddress;
use axum_courier_api::dto::orders::{BookShipmentForm, NewOrder};
use axum_courier_api::dto::packages::NewPackage;
use axum_courier_api::forms::RawForm;
use axum_courier_api::models::{PackageType, PriorityLevel};

fn form(pairs: &[(&str, &str)]) -> RawForm {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn address_parses_with_defaults() {
    let raw = form(&[
        ("street", "1 Main St"),
        ("city", "Springfield"),
        ("state", "IL"),
        ("zipCode", "62701"),
    ]);
    let address = NewAddress::from_form(&raw).expect("valid address");
    assert_eq!(address.street, "1 Main St");
    assert_eq!(address.country, "USA");
    assert_eq!(address.latitude, None);
    assert_eq!(address.longitude, None);
}

#[test]
fn address_coerces_coordinates() {
    let raw = form(&[
        ("street", "1 Main St"),
        ("city", "Springfield"),
        ("state", "IL"),
        ("zipCode", "62701"),
        ("latitude", "39.7817"),
        ("longitude", "-89.6501"),
    ]);
    let address = NewAddress::from_form(&raw).expect("valid address");
    assert_eq!(address.latitude, Some(39.7817));
    assert_eq!(address.longitude, Some(-89.6501));
}

#[test]
fn address_reports_every_missing_field() {
    let raw = form(&[("street", "1 Main St")]);
    let errors = NewAddress::from_form(&raw).expect_err("missing fields");
    assert!(errors.contains_key("city"));
    assert!(errors.contains_key("state"));
    assert!(errors.contains_key("zipCode"));
    assert!(!errors.contains_key("street"));
    assert_eq!(errors["city"], vec!["is required".to_string()]);
}

#[test]
fn blank_input_counts_as_missing() {
    let raw = form(&[
        ("street", "   "),
        ("city", "Springfield"),
        ("state", "IL"),
        ("zipCode", "62701"),
    ]);
    let errors = NewAddress::from_form(&raw).expect_err("blank street");
    assert_eq!(errors["street"], vec!["is required".to_string()]);
}

#[test]
fn package_parses_and_coerces() {
    let raw = form(&[
        ("type", "ENVELOPE"),
        ("weightKg", "2.5"),
        ("isFragile", "yes"),
    ]);
    let package = NewPackage::from_form(&raw).expect("valid package");
    assert_eq!(package.package_type, PackageType::Envelope);
    assert_eq!(package.weight_kg, Decimal::new(25, 1));
    assert!(package.is_fragile);
    assert_eq!(package.declared_value, Decimal::ZERO);
}

#[test]
fn package_rejects_non_positive_weight() {
    let raw = form(&[("type", "ENVELOPE"), ("weightKg", "-1")]);
    let errors = NewPackage::from_form(&raw).expect_err("negative weight");
    assert_eq!(errors["weightKg"], vec!["must be greater than 0".to_string()]);

    let raw = form(&[("type", "ENVELOPE"), ("weightKg", "0")]);
    let errors = NewPackage::from_form(&raw).expect_err("zero weight");
    assert_eq!(errors["weightKg"], vec!["must be greater than 0".to_string()]);
}

#[test]
fn package_type_is_case_sensitive() {
    let raw = form(&[("type", "envelope"), ("weightKg", "1")]);
    let errors = NewPackage::from_form(&raw).expect_err("lowercase type");
    assert_eq!(
        errors["type"],
        vec!["is not a valid package type".to_string()]
    );

    let raw = form(&[("type", "BOX"), ("weightKg", "1")]);
    let errors = NewPackage::from_form(&raw).expect_err("unknown type");
    assert!(errors.contains_key("type"));
}

#[test]
fn package_rejects_bad_boolean_and_negative_value() {
    let raw = form(&[
        ("type", "ENVELOPE"),
        ("weightKg", "1"),
        ("isFragile", "maybe"),
        ("declaredValue", "-10"),
    ]);
    let errors = NewPackage::from_form(&raw).expect_err("bad fields");
    assert_eq!(errors["isFragile"], vec!["must be a boolean".to_string()]);
    assert_eq!(
        errors["declaredValue"],
        vec!["must be zero or greater".to_string()]
    );
}

#[test]
fn order_requires_well_formed_references() {
    let raw = form(&[
        ("pickup_address_id", "not-a-uuid"),
        ("delivery_address_id", "11111111-2222-3333-4444-555555555555"),
        ("package_id", "11111111-2222-3333-4444-555555555556"),
        ("priority", "EXPRESS"),
        ("estimated_price", "12.50"),
    ]);
    let errors = NewOrder::from_form(&raw).expect_err("bad pickup id");
    assert_eq!(
        errors["pickup_address_id"],
        vec!["must be a valid UUID".to_string()]
    );
}

#[test]
fn order_parses_with_optional_fields_absent() {
    let raw = form(&[
        ("pickup_address_id", "11111111-2222-3333-4444-555555555555"),
        ("delivery_address_id", "11111111-2222-3333-4444-555555555556"),
        ("package_id", "11111111-2222-3333-4444-555555555557"),
        ("priority", "SAME_DAY"),
        ("estimated_price", "0"),
    ]);
    let order = NewOrder::from_form(&raw).expect("valid order");
    assert_eq!(order.priority, PriorityLevel::SameDay);
    assert_eq!(order.estimated_price, Decimal::ZERO);
    assert!(order.courier_id.is_none());
    assert!(order.requested_pickup_date.is_none());
}

#[test]
fn order_rejects_negative_estimated_price() {
    let raw = form(&[
        ("pickup_address_id", "11111111-2222-3333-4444-555555555555"),
        ("delivery_address_id", "11111111-2222-3333-4444-555555555556"),
        ("package_id", "11111111-2222-3333-4444-555555555557"),
        ("priority", "STANDARD"),
        ("estimated_price", "-5"),
    ]);
    let errors = NewOrder::from_form(&raw).expect_err("negative price");
    assert_eq!(
        errors["estimated_price"],
        vec!["must be zero or greater".to_string()]
    );
}

#[test]
fn order_parses_rfc3339_dates() {
    let raw = form(&[
        ("pickup_address_id", "11111111-2222-3333-4444-555555555555"),
        ("delivery_address_id", "11111111-2222-3333-4444-555555555556"),
        ("package_id", "11111111-2222-3333-4444-555555555557"),
        ("priority", "STANDARD"),
        ("estimated_price", "10"),
        ("requested_pickup_date", "2026-08-07T09:00:00Z"),
    ]);
    let order = NewOrder::from_form(&raw).expect("valid order");
    assert!(order.requested_pickup_date.is_some());

    let raw = form(&[
        ("pickup_address_id", "11111111-2222-3333-4444-555555555555"),
        ("delivery_address_id", "11111111-2222-3333-4444-555555555556"),
        ("package_id", "11111111-2222-3333-4444-555555555557"),
        ("priority", "STANDARD"),
        ("estimated_price", "10"),
        ("requested_pickup_date", "tomorrow"),
    ]);
    let errors = NewOrder::from_form(&raw).expect_err("bad date");
    assert_eq!(
        errors["requested_pickup_date"],
        vec!["must be an RFC 3339 timestamp".to_string()]
    );
}

#[test]
fn booking_form_prefixes_field_errors() {
    let raw = form(&[
        ("pickup_street", "1 Main St"),
        ("pickup_city", "Springfield"),
        ("pickup_state", "IL"),
        ("pickup_zipCode", "62701"),
        // delivery address entirely missing
        ("type", "SMALL_PACKAGE"),
        ("weightKg", "1.2"),
        ("priority", "EXPRESS"),
        ("estimated_price", "20"),
    ]);
    let errors = BookShipmentForm::from_form(&raw).expect_err("missing delivery");
    assert!(errors.contains_key("delivery_street"));
    assert!(errors.contains_key("delivery_city"));
    assert!(!errors.contains_key("pickup_street"));
    assert!(!errors.contains_key("weightKg"));
}

#[test]
fn booking_form_parses_complete_input() {
    let raw = form(&[
        ("pickup_street", "1 Main St"),
        ("pickup_city", "Springfield"),
        ("pickup_state", "IL"),
        ("pickup_zipCode", "62701"),
        ("delivery_street", "500 Lakeshore Dr"),
        ("delivery_city", "Chicago"),
        ("delivery_state", "IL"),
        ("delivery_zipCode", "60611"),
        ("type", "SMALL_PACKAGE"),
        ("weightKg", "1.2"),
        ("priority", "EXPRESS"),
        ("estimated_price", "20"),
    ]);
    let booking = BookShipmentForm::from_form(&raw).expect("valid booking");
    assert_eq!(booking.pickup.city, "Springfield");
    assert_eq!(booking.delivery.city, "Chicago");
    assert_eq!(booking.package.package_type, PackageType::SmallPackage);
    assert_eq!(booking.order.priority, PriorityLevel::Express);
}
