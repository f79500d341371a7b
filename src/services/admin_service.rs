use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::orders::{AssignCourierForm, OrderList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderStatus, UserRole},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
};

pub async fn list_all_orders(
    pool: &DbPool,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, per_page, offset) = query.pagination().normalize();
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let sql = format!(
        "SELECT * FROM orders \
         WHERE ($1::order_status IS NULL OR status = $1) \
         ORDER BY created_at {} LIMIT $2 OFFSET $3",
        sort_order.as_sql()
    );
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(query.status)
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let total: (i64,) =
        sqlx::query_as("SELECT count(*) FROM orders WHERE ($1::order_status IS NULL OR status = $1)")
            .bind(query.status)
            .fetch_one(pool)
            .await?;

    let meta = Meta::new(page, per_page, total.0);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Attach a courier to a PENDING order. Assignment does not advance the
/// status; the courier does that by recording an ACCEPTED tracking event.
pub async fn assign_courier(
    pool: &DbPool,
    user: &AuthUser,
    order_id: Uuid,
    payload: AssignCourierForm,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;

    let mut txn = pool.begin().await?;

    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .fetch_optional(&mut *txn)
        .await?;
    let order = order.ok_or(AppError::NotFound)?;

    if order.status != OrderStatus::Pending {
        return Err(AppError::BadRequest(
            "Only pending orders can be assigned".into(),
        ));
    }

    let courier: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM users WHERE id = $1 AND role = $2 AND is_active",
    )
    .bind(payload.courier_id)
    .bind(UserRole::Courier)
    .fetch_optional(&mut *txn)
    .await?;
    if courier.is_none() {
        return Err(AppError::BadRequest(
            "Courier does not exist or is not active".into(),
        ));
    }

    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET courier_id = $2, updated_at = CURRENT_TIMESTAMP \
         WHERE id = $1 RETURNING *",
    )
    .bind(order.id)
    .bind(payload.courier_id)
    .fetch_one(&mut *txn)
    .await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, courier_id = %payload.courier_id, "courier assigned");
    Ok(ApiResponse::success(
        "Courier assigned",
        order,
        Some(Meta::empty()),
    ))
}
