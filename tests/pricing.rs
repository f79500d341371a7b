use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use axum_courier_api::models::{PackageType, PricingRule, PriorityLevel};
use axum_courier_api::services::pricing_service::compute_estimate;

fn rule(base: i64, per_km: i64, per_kg: Option<i64>, multiplier: i64) -> PricingRule {
    PricingRule {
        id: Uuid::new_v4(),
        package_type: PackageType::SmallPackage,
        base_price: Decimal::new(base, 2),
        price_per_km: Decimal::new(per_km, 2),
        price_per_kg: per_kg.map(|value| Decimal::new(value, 2)),
        priority_multiplier: Decimal::new(multiplier, 2),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn standard_priority_pays_base_rates() {
    // 5.00 + 10 km * 1.00 + 2 kg * 0.50 = 16.00
    let rule = rule(500, 100, Some(50), 150);
    let price = compute_estimate(
        &rule,
        Decimal::new(2, 0),
        Decimal::new(10, 0),
        PriorityLevel::Standard,
    );
    assert_eq!(price, Decimal::new(1600, 2));
}

#[test]
fn non_standard_priority_applies_the_multiplier() {
    // 16.00 * 1.50 = 24.00
    let rule = rule(500, 100, Some(50), 150);
    for priority in [
        PriorityLevel::Express,
        PriorityLevel::Urgent,
        PriorityLevel::SameDay,
    ] {
        let price = compute_estimate(&rule, Decimal::new(2, 0), Decimal::new(10, 0), priority);
        assert_eq!(price, Decimal::new(2400, 2));
    }
}

#[test]
fn missing_per_kg_rate_ignores_weight() {
    // 4.50 + 8 km * 0.80 = 10.90, regardless of weight
    let rule = rule(450, 80, None, 150);
    let light = compute_estimate(
        &rule,
        Decimal::new(1, 0),
        Decimal::new(8, 0),
        PriorityLevel::Standard,
    );
    let heavy = compute_estimate(
        &rule,
        Decimal::new(30, 0),
        Decimal::new(8, 0),
        PriorityLevel::Standard,
    );
    assert_eq!(light, Decimal::new(1090, 2));
    assert_eq!(light, heavy);
}

#[test]
fn estimates_round_to_cents() {
    // 1.00 + 3 km * 0.33 * 1.75 multiplier = 3.4825 -> 3.48
    let rule = rule(100, 33, None, 175);
    let price = compute_estimate(
        &rule,
        Decimal::new(1, 0),
        Decimal::new(3, 0),
        PriorityLevel::Urgent,
    );
    assert_eq!(price, Decimal::new(348, 2));
}
