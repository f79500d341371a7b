use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Raised when a string is not a member of one of the closed enum sets.
/// Matching is case-sensitive; `pending` is not a valid order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEnumValue;

macro_rules! enum_strings {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(InvalidEnumValue),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    Courier,
    Admin,
    Support,
}

enum_strings!(UserRole {
    Customer => "CUSTOMER",
    Courier => "COURIER",
    Admin => "ADMIN",
    Support => "SUPPORT",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Cancelled,
    FailedDelivery,
}

enum_strings!(OrderStatus {
    Pending => "PENDING",
    Accepted => "ACCEPTED",
    PickedUp => "PICKED_UP",
    InTransit => "IN_TRANSIT",
    OutForDelivery => "OUT_FOR_DELIVERY",
    Delivered => "DELIVERED",
    Cancelled => "CANCELLED",
    FailedDelivery => "FAILED_DELIVERY",
});

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::FailedDelivery
        )
    }

    /// The order lifecycle: a linear delivery chain, with cancellation and
    /// delivery failure reachable from every non-terminal state. Recording
    /// the current status again is legal so couriers can post progress
    /// updates without moving the order.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == self {
            return true;
        }
        if matches!(next, OrderStatus::Cancelled | OrderStatus::FailedDelivery) {
            return true;
        }
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Accepted)
                | (OrderStatus::Accepted, OrderStatus::PickedUp)
                | (OrderStatus::PickedUp, OrderStatus::InTransit)
                | (OrderStatus::InTransit, OrderStatus::OutForDelivery)
                | (OrderStatus::OutForDelivery, OrderStatus::Delivered)
        )
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "package_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageType {
    Envelope,
    SmallPackage,
    MediumPackage,
    LargePackage,
    Fragile,
    FoodDelivery,
    Documents,
}

enum_strings!(PackageType {
    Envelope => "ENVELOPE",
    SmallPackage => "SMALL_PACKAGE",
    MediumPackage => "MEDIUM_PACKAGE",
    LargePackage => "LARGE_PACKAGE",
    Fragile => "FRAGILE",
    FoodDelivery => "FOOD_DELIVERY",
    Documents => "DOCUMENTS",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "priority_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Standard,
    Express,
    Urgent,
    SameDay,
}

enum_strings!(PriorityLevel {
    Standard => "STANDARD",
    Express => "EXPRESS",
    Urgent => "URGENT",
    SameDay => "SAME_DAY",
});

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CourierProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_type: String,
    pub license_plate: String,
    pub rating: Decimal,
    pub total_deliveries: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Immutable once created; there is no address update path.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Address {
    pub id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Package {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub weight_kg: Decimal,
    pub dimensions: Option<String>,
    pub is_fragile: bool,
    pub special_instructions: Option<String>,
    pub declared_value: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub priority: PriorityLevel,
    pub customer_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub pickup_address_id: Uuid,
    pub delivery_address_id: Uuid,
    pub package_id: Uuid,
    pub requested_pickup_date: Option<DateTime<Utc>>,
    pub actual_pickup_date: Option<DateTime<Utc>>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub actual_delivery_date: Option<DateTime<Utc>>,
    pub estimated_price: Option<Decimal>,
    pub final_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct PricingRule {
    pub id: Uuid,
    pub package_type: PackageType,
    pub base_price: Decimal,
    pub price_per_km: Decimal,
    pub price_per_kg: Option<Decimal>,
    pub priority_multiplier: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One append-only entry in an order's audit trail. Rows are never updated
/// or deleted once written.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct TrackingEvent {
    pub id: Uuid,
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub message: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub updated_by: Uuid,
    pub timestamp: DateTime<Utc>,
}
