use axum::{
    Form, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::packages::NewPackage,
    error::{AppError, AppResult},
    forms::RawForm,
    middleware::auth::AuthUser,
    models::Package,
    response::ApiResponse,
    services::package_service,
};

pub fn router() -> Router<DbPool> {
    Router::new()
        .route("/", post(create_package))
        .route("/{id}", get(get_package))
}

#[utoipa::path(post, path = "/api/packages", tag = "Packages")]
pub async fn create_package(
    State(pool): State<DbPool>,
    _user: AuthUser,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<Package>>> {
    let payload = NewPackage::from_form(&raw).map_err(AppError::Validation)?;
    let resp = package_service::create_package(&pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/packages/{id}", tag = "Packages")]
pub async fn get_package(
    State(pool): State<DbPool>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Package>>> {
    let resp = package_service::get_package(&pool, id).await?;
    Ok(Json(resp))
}
