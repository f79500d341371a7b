use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::orders::{AssignCourierForm, OrderList},
    error::{AppError, AppResult},
    forms::RawForm,
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::admin_service,
};

pub fn router() -> Router<DbPool> {
    Router::new()
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}/assign", post(assign_courier))
}

#[utoipa::path(get, path = "/api/admin/orders", tag = "Admin")]
pub async fn list_all_orders(
    State(pool): State<DbPool>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&pool, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/admin/orders/{id}/assign", tag = "Admin")]
pub async fn assign_courier(
    State(pool): State<DbPool>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let payload = AssignCourierForm::from_form(&raw).map_err(AppError::Validation)?;
    let resp = admin_service::assign_courier(&pool, &user, id, payload).await?;
    Ok(Json(resp))
}
