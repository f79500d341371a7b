use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        orders::{BookedShipment, Estimate, OrderDetail, OrderList},
        tracking::TrackingHistory,
    },
    models::{
        Address, CourierProfile, Order, OrderStatus, Package, PackageType, PricingRule,
        PriorityLevel, TrackingEvent, User, UserProfile, UserRole,
    },
    response::{ApiResponse, Meta},
    routes::{addresses, admin, auth, couriers, health, orders, packages, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        addresses::create_address,
        addresses::get_address,
        packages::create_package,
        packages::get_package,
        orders::create_order,
        orders::book_shipment,
        orders::estimate,
        orders::list_orders,
        orders::get_order,
        orders::record_tracking,
        orders::tracking_history,
        couriers::create_profile,
        couriers::set_availability,
        admin::list_all_orders,
        admin::assign_courier
    ),
    components(
        schemas(
            User,
            UserProfile,
            CourierProfile,
            Address,
            Package,
            Order,
            PricingRule,
            TrackingEvent,
            UserRole,
            OrderStatus,
            PackageType,
            PriorityLevel,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            OrderList,
            OrderDetail,
            BookedShipment,
            Estimate,
            TrackingHistory,
            params::Pagination,
            params::SortOrder,
            params::OrderListQuery,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderDetail>,
            ApiResponse<Address>,
            ApiResponse<Package>,
            ApiResponse<TrackingEvent>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Addresses", description = "Address endpoints"),
        (name = "Packages", description = "Package endpoints"),
        (name = "Orders", description = "Order booking and lookup"),
        (name = "Tracking", description = "Order tracking trail"),
        (name = "Couriers", description = "Courier profile endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
