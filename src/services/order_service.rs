use chrono::Utc;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::orders::{BookShipmentForm, BookedShipment, NewOrder, OrderDetail, OrderList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Address, Order, Package, UserRole},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{address_service, package_service, tracking_service},
};

/// Create an order from rows the caller already persisted. The database
/// enforces the references; a missing address or an already-ordered package
/// comes back as a conflict, and the new order starts as PENDING with no
/// final price.
pub async fn create_order(
    pool: &DbPool,
    user: &AuthUser,
    payload: NewOrder,
) -> AppResult<ApiResponse<Order>> {
    let order = insert_order(pool, user.user_id, &payload).await?;
    tracing::info!(order_id = %order.id, order_number = %order.order_number, "order created");
    Ok(ApiResponse::success(
        "Order created",
        order,
        Some(Meta::empty()),
    ))
}

/// One-shot booking: pickup address, delivery address, package and order are
/// written in a single transaction. A failure on any row rolls back all of
/// them, so no orphaned package is ever left behind.
pub async fn book_shipment(
    pool: &DbPool,
    user: &AuthUser,
    payload: BookShipmentForm,
) -> AppResult<ApiResponse<BookedShipment>> {
    let mut txn = pool.begin().await?;

    let pickup_address = address_service::insert_address(&mut *txn, &payload.pickup).await?;
    let delivery_address = address_service::insert_address(&mut *txn, &payload.delivery).await?;
    let package = package_service::insert_package(&mut *txn, &payload.package).await?;

    let new_order = NewOrder {
        pickup_address_id: pickup_address.id,
        delivery_address_id: delivery_address.id,
        package_id: package.id,
        priority: payload.order.priority,
        courier_id: None,
        requested_pickup_date: payload.order.requested_pickup_date,
        estimated_delivery_date: payload.order.estimated_delivery_date,
        estimated_price: payload.order.estimated_price,
    };
    let order = insert_order(&mut *txn, user.user_id, &new_order).await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, order_number = %order.order_number, "shipment booked");
    Ok(ApiResponse::success(
        "Shipment booked",
        BookedShipment {
            order,
            package,
            pickup_address,
            delivery_address,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    pool: &DbPool,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, per_page, offset) = query.pagination().normalize();
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let sql = format!(
        "SELECT * FROM orders \
         WHERE customer_id = $1 AND ($2::order_status IS NULL OR status = $2) \
         ORDER BY created_at {} LIMIT $3 OFFSET $4",
        sort_order.as_sql()
    );
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(user.user_id)
        .bind(query.status)
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let total: (i64,) = sqlx::query_as(
        "SELECT count(*) FROM orders \
         WHERE customer_id = $1 AND ($2::order_status IS NULL OR status = $2)",
    )
    .bind(user.user_id)
    .bind(query.status)
    .fetch_one(pool)
    .await?;

    let meta = Meta::new(page, per_page, total.0);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    let order = fetch_order_visible_to(pool, user, id).await?;

    let package = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1")
        .bind(order.package_id)
        .fetch_one(pool)
        .await?;
    let pickup_address = fetch_address(pool, order.pickup_address_id).await?;
    let delivery_address = fetch_address(pool, order.delivery_address_id).await?;
    let tracking = tracking_service::fetch_history(pool, order.id).await?;

    Ok(ApiResponse::success(
        "OK",
        OrderDetail {
            order,
            package,
            pickup_address,
            delivery_address,
            tracking,
        },
        Some(Meta::empty()),
    ))
}

/// Fetch an order if this user is allowed to see it: customers their own,
/// couriers their assignments, admin and support everything. Outsiders get
/// NotFound rather than a hint the order exists.
pub(crate) async fn fetch_order_visible_to(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> Result<Order, AppError> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let order = order.ok_or(AppError::NotFound)?;

    let visible = match user.role {
        UserRole::Admin | UserRole::Support => true,
        UserRole::Courier => order.courier_id == Some(user.user_id),
        UserRole::Customer => order.customer_id == user.user_id,
    };
    if !visible {
        return Err(AppError::NotFound);
    }
    Ok(order)
}

pub(crate) async fn insert_order<'e>(
    executor: impl PgExecutor<'e>,
    customer_id: Uuid,
    new: &NewOrder,
) -> Result<Order, AppError> {
    let id = Uuid::new_v4();
    let order_number = build_order_number(id);
    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (
            id, order_number, priority, customer_id, courier_id,
            pickup_address_id, delivery_address_id, package_id,
            requested_pickup_date, estimated_delivery_date, estimated_price
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&order_number)
    .bind(new.priority)
    .bind(customer_id)
    .bind(new.courier_id)
    .bind(new.pickup_address_id)
    .bind(new.delivery_address_id)
    .bind(new.package_id)
    .bind(new.requested_pickup_date)
    .bind(new.estimated_delivery_date)
    .bind(new.estimated_price)
    .fetch_one(executor)
    .await?;
    Ok(order)
}

async fn fetch_address(pool: &DbPool, id: Uuid) -> Result<Address, AppError> {
    let address = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(address)
}

/// Human-readable order number: the booking date plus the first chunk of the
/// order UUID. The unique index on `order_number` backs this up.
fn build_order_number(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = order_id.to_string();
    let short = &suffix[..8];
    format!("ORD-{}-{}", date, short)
}
