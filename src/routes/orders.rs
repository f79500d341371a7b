use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::{
        orders::{
            BookShipmentForm, BookedShipment, Estimate, EstimateRequest, NewOrder, OrderDetail,
            OrderList,
        },
        tracking::{NewTrackingEvent, TrackingHistory},
    },
    error::{AppError, AppResult},
    forms::RawForm,
    middleware::auth::AuthUser,
    models::{Order, TrackingEvent},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::{order_service, pricing_service, tracking_service},
};

pub fn router() -> Router<DbPool> {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/book", post(book_shipment))
        .route("/estimate", post(estimate))
        .route("/{id}", get(get_order))
        .route("/{id}/tracking", post(record_tracking).get(tracking_history))
}

#[utoipa::path(post, path = "/api/orders", tag = "Orders")]
pub async fn create_order(
    State(pool): State<DbPool>,
    user: AuthUser,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let payload = NewOrder::from_form(&raw).map_err(AppError::Validation)?;
    let resp = order_service::create_order(&pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/orders/book", tag = "Orders")]
pub async fn book_shipment(
    State(pool): State<DbPool>,
    user: AuthUser,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<BookedShipment>>> {
    let payload = BookShipmentForm::from_form(&raw).map_err(AppError::Validation)?;
    let resp = order_service::book_shipment(&pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/orders/estimate", tag = "Orders")]
pub async fn estimate(
    State(pool): State<DbPool>,
    _user: AuthUser,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<Estimate>>> {
    let payload = EstimateRequest::from_form(&raw).map_err(AppError::Validation)?;
    let resp = pricing_service::estimate(&pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/orders", tag = "Orders")]
pub async fn list_orders(
    State(pool): State<DbPool>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&pool, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/orders/{id}", tag = "Orders")]
pub async fn get_order(
    State(pool): State<DbPool>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::get_order(&pool, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/orders/{id}/tracking", tag = "Tracking")]
pub async fn record_tracking(
    State(pool): State<DbPool>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<TrackingEvent>>> {
    let payload = NewTrackingEvent::from_form(&raw).map_err(AppError::Validation)?;
    let resp = tracking_service::record_event(&pool, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/orders/{id}/tracking", tag = "Tracking")]
pub async fn tracking_history(
    State(pool): State<DbPool>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TrackingHistory>>> {
    let resp = tracking_service::list_events(&pool, &user, id).await?;
    Ok(Json(resp))
}
