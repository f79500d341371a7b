use axum::{
    Form, Json, Router,
    extract::State,
    routing::{patch, post},
};

use crate::{
    db::DbPool,
    dto::couriers::{AvailabilityForm, NewCourierProfile},
    error::{AppError, AppResult},
    forms::RawForm,
    middleware::auth::AuthUser,
    models::CourierProfile,
    response::ApiResponse,
    services::courier_service,
};

pub fn router() -> Router<DbPool> {
    Router::new()
        .route("/profile", post(create_profile))
        .route("/availability", patch(set_availability))
}

#[utoipa::path(post, path = "/api/couriers/profile", tag = "Couriers")]
pub async fn create_profile(
    State(pool): State<DbPool>,
    user: AuthUser,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<CourierProfile>>> {
    let payload = NewCourierProfile::from_form(&raw).map_err(AppError::Validation)?;
    let resp = courier_service::create_profile(&pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(patch, path = "/api/couriers/availability", tag = "Couriers")]
pub async fn set_availability(
    State(pool): State<DbPool>,
    user: AuthUser,
    Form(raw): Form<RawForm>,
) -> AppResult<Json<ApiResponse<CourierProfile>>> {
    let payload = AvailabilityForm::from_form(&raw).map_err(AppError::Validation)?;
    let resp = courier_service::set_availability(&pool, &user, payload).await?;
    Ok(Json(resp))
}
