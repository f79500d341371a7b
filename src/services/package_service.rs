use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::packages::NewPackage,
    error::{AppError, AppResult},
    models::Package,
    response::{ApiResponse, Meta},
};

pub async fn create_package(pool: &DbPool, payload: NewPackage) -> AppResult<ApiResponse<Package>> {
    let package = insert_package(pool, &payload).await?;
    tracing::debug!(package_id = %package.id, "package created");
    Ok(ApiResponse::success(
        "Package created",
        package,
        Some(Meta::empty()),
    ))
}

pub async fn get_package(pool: &DbPool, id: Uuid) -> AppResult<ApiResponse<Package>> {
    let package = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let package = package.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Package", package, None))
}

pub(crate) async fn insert_package<'e>(
    executor: impl PgExecutor<'e>,
    new: &NewPackage,
) -> Result<Package, AppError> {
    let package = sqlx::query_as::<_, Package>(
        r#"
        INSERT INTO packages (id, type, weight_kg, dimensions, is_fragile, special_instructions, declared_value)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.package_type)
    .bind(new.weight_kg)
    .bind(&new.dimensions)
    .bind(new.is_fragile)
    .bind(&new.special_instructions)
    .bind(new.declared_value)
    .fetch_one(executor)
    .await?;
    Ok(package)
}
