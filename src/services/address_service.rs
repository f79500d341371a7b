use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::addresses::NewAddress,
    error::{AppError, AppResult},
    models::Address,
    response::{ApiResponse, Meta},
};

pub async fn create_address(pool: &DbPool, payload: NewAddress) -> AppResult<ApiResponse<Address>> {
    let address = insert_address(pool, &payload).await?;
    tracing::debug!(address_id = %address.id, "address created");
    Ok(ApiResponse::success(
        "Address created",
        address,
        Some(Meta::empty()),
    ))
}

pub async fn get_address(pool: &DbPool, id: Uuid) -> AppResult<ApiResponse<Address>> {
    let address = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let address = address.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Address", address, None))
}

// Addresses are deliberately not deduplicated; two customers shipping to the
// same street get two rows.
pub(crate) async fn insert_address<'e>(
    executor: impl PgExecutor<'e>,
    new: &NewAddress,
) -> Result<Address, AppError> {
    let address = sqlx::query_as::<_, Address>(
        r#"
        INSERT INTO addresses (id, street, city, state, zip_code, country, latitude, longitude)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.street)
    .bind(&new.city)
    .bind(&new.state)
    .bind(&new.zip_code)
    .bind(&new.country)
    .bind(new.latitude)
    .bind(new.longitude)
    .fetch_one(executor)
    .await?;
    Ok(address)
}
