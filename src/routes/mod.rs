use axum::Router;

use crate::db::DbPool;

pub mod addresses;
pub mod admin;
pub mod auth;
pub mod couriers;
pub mod doc;
pub mod health;
pub mod orders;
pub mod packages;
pub mod params;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<DbPool> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/addresses", addresses::router())
        .nest("/packages", packages::router())
        .nest("/orders", orders::router())
        .nest("/couriers", couriers::router())
        .nest("/admin", admin::router())
}
