use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::couriers::{AvailabilityForm, NewCourierProfile},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{CourierProfile, UserRole},
    response::{ApiResponse, Meta},
};

/// A courier registers their vehicle once; a second registration for the
/// same user, or a reused license plate, is rejected by the unique
/// constraints.
pub async fn create_profile(
    pool: &DbPool,
    user: &AuthUser,
    payload: NewCourierProfile,
) -> AppResult<ApiResponse<CourierProfile>> {
    ensure_role(user, UserRole::Courier)?;

    let profile = sqlx::query_as::<_, CourierProfile>(
        r#"
        INSERT INTO courier_profiles (id, user_id, vehicle_type, license_plate)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(&payload.vehicle_type)
    .bind(&payload.license_plate)
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id = %user.user_id, "courier profile created");
    Ok(ApiResponse::success(
        "Courier profile created",
        profile,
        Some(Meta::empty()),
    ))
}

pub async fn set_availability(
    pool: &DbPool,
    user: &AuthUser,
    payload: AvailabilityForm,
) -> AppResult<ApiResponse<CourierProfile>> {
    ensure_role(user, UserRole::Courier)?;

    let profile = sqlx::query_as::<_, CourierProfile>(
        "UPDATE courier_profiles SET is_available = $2 WHERE user_id = $1 RETURNING *",
    )
    .bind(user.user_id)
    .bind(payload.is_available)
    .fetch_optional(pool)
    .await?;
    let profile = profile.ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Availability updated",
        profile,
        Some(Meta::empty()),
    ))
}
