use axum::{
    Form, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::addresses::NewAddress,
    error::{AppError, AppResult},
    forms::RawForm,
    middleware::auth::AuthUser,
    models::Address,
    response::ApiResponse,
    services::address_service,
};

pub fn router() -> Router<DbPool> {
    Router::new()
        .route("/", post(create_address))
        .route("/{id}", get(get_address))
}

#[utoipa::path(post, path = "/api/addresses", tag = "Addresses")]
pub async fn create_address(
    State(pool): State<DbPool>,
    _user: AuthUser,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let payload = NewAddress::from_form(&raw).map_err(AppError::Validation)?;
    let resp = address_service::create_address(&pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/addresses/{id}", tag = "Addresses")]
pub async fn get_address(
    State(pool): State<DbPool>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let resp = address_service::get_address(&pool, id).await?;
    Ok(Json(resp))
}
