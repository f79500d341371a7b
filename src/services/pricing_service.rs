use rust_decimal::Decimal;

use crate::{
    db::DbPool,
    dto::orders::{Estimate, EstimateRequest},
    error::{AppError, AppResult},
    models::{PricingRule, PriorityLevel},
    response::{ApiResponse, Meta},
};

/// Quote a shipment against the newest active rule for its package type.
/// Distance is caller-supplied; this service prices, it does not route.
pub async fn estimate(pool: &DbPool, payload: EstimateRequest) -> AppResult<ApiResponse<Estimate>> {
    let rule = sqlx::query_as::<_, PricingRule>(
        "SELECT * FROM pricing_rules \
         WHERE package_type = $1 AND is_active \
         ORDER BY created_at DESC LIMIT 1",
    )
    .bind(payload.package_type)
    .fetch_optional(pool)
    .await?;
    let rule = rule.ok_or_else(|| {
        AppError::BadRequest("No active pricing rule for this package type".into())
    })?;

    let estimated_price =
        compute_estimate(&rule, payload.weight_kg, payload.distance_km, payload.priority);

    Ok(ApiResponse::success(
        "Estimate",
        Estimate {
            package_type: payload.package_type,
            priority: payload.priority,
            estimated_price,
        },
        Some(Meta::empty()),
    ))
}

/// `(base + per_km * distance + per_kg * weight) * multiplier`, rounded to
/// cents. STANDARD pays base rates; every other priority pays the rule's
/// multiplier.
pub fn compute_estimate(
    rule: &PricingRule,
    weight_kg: Decimal,
    distance_km: Decimal,
    priority: PriorityLevel,
) -> Decimal {
    let mut price = rule.base_price + rule.price_per_km * distance_km;
    if let Some(price_per_kg) = rule.price_per_kg {
        price += price_per_kg * weight_kg;
    }
    if priority != PriorityLevel::Standard {
        price *= rule.priority_multiplier;
    }
    price.round_dp(2)
}
