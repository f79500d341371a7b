use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::tracking::{NewTrackingEvent, TrackingHistory},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::{Order, OrderStatus, TrackingEvent},
    response::{ApiResponse, Meta},
    services::order_service,
};

/// Append a tracking event and, when the event carries a new status, advance
/// the order with it — all inside one transaction holding a row lock on the
/// order. Illegal transitions write nothing. Tracking rows are append-only;
/// no code path updates or deletes them.
pub async fn record_event(
    pool: &DbPool,
    user: &AuthUser,
    order_id: Uuid,
    payload: NewTrackingEvent,
) -> AppResult<ApiResponse<TrackingEvent>> {
    ensure_staff(user)?;

    let mut txn = pool.begin().await?;

    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .fetch_optional(&mut *txn)
        .await?;
    let order = order.ok_or(AppError::NotFound)?;

    if !order.status.can_transition_to(payload.status) {
        return Err(AppError::field(
            "status",
            format!(
                "cannot move a {} order to {}",
                order.status, payload.status
            ),
        ));
    }

    let event = sqlx::query_as::<_, TrackingEvent>(
        r#"
        INSERT INTO order_tracking (id, order_id, status, message, latitude, longitude, updated_by, timestamp)
        VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, CURRENT_TIMESTAMP))
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(order.id)
    .bind(payload.status)
    .bind(&payload.message)
    .bind(payload.latitude)
    .bind(payload.longitude)
    .bind(user.user_id)
    .bind(payload.timestamp)
    .fetch_one(&mut *txn)
    .await?;

    // Same-status events are progress pings; only a real transition touches
    // the order row. Pickup and delivery stamp their actual dates once.
    if payload.status != order.status {
        sqlx::query(
            r#"
            UPDATE orders SET
                status = $2,
                actual_pickup_date = CASE
                    WHEN $2 = 'PICKED_UP'::order_status
                    THEN COALESCE(actual_pickup_date, CURRENT_TIMESTAMP)
                    ELSE actual_pickup_date
                END,
                actual_delivery_date = CASE
                    WHEN $2 = 'DELIVERED'::order_status
                    THEN COALESCE(actual_delivery_date, CURRENT_TIMESTAMP)
                    ELSE actual_delivery_date
                END,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            "#,
        )
        .bind(order.id)
        .bind(payload.status)
        .execute(&mut *txn)
        .await?;

        if payload.status == OrderStatus::Delivered {
            if let Some(courier_id) = order.courier_id {
                sqlx::query(
                    "UPDATE courier_profiles SET total_deliveries = total_deliveries + 1 \
                     WHERE user_id = $1",
                )
                .bind(courier_id)
                .execute(&mut *txn)
                .await?;
            }
        }
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        status = %event.status,
        updated_by = %user.user_id,
        "tracking event recorded"
    );
    Ok(ApiResponse::success(
        "Tracking event recorded",
        event,
        Some(Meta::empty()),
    ))
}

pub async fn list_events(
    pool: &DbPool,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<TrackingHistory>> {
    let order = order_service::fetch_order_visible_to(pool, user, order_id).await?;
    let items = fetch_history(pool, order.id).await?;
    Ok(ApiResponse::success(
        "Tracking history",
        TrackingHistory { items },
        Some(Meta::empty()),
    ))
}

pub(crate) async fn fetch_history(
    pool: &DbPool,
    order_id: Uuid,
) -> Result<Vec<TrackingEvent>, AppError> {
    let items = sqlx::query_as::<_, TrackingEvent>(
        "SELECT * FROM order_tracking WHERE order_id = $1 ORDER BY timestamp ASC, id ASC",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}
