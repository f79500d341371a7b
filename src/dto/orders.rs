use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::addresses::NewAddress;
use crate::dto::packages::NewPackage;
use crate::forms::{FieldErrors, FormParser, RawForm, merge_errors};
use crate::models::{Address, Order, Package, PackageType, PriorityLevel, TrackingEvent};

/// Order creation against already-persisted address and package rows. The
/// referenced rows are not re-checked here; a dangling id comes back from
/// the database as a constraint conflict.
#[derive(Debug, Clone, ToSchema)]
pub struct NewOrder {
    pub pickup_address_id: Uuid,
    pub delivery_address_id: Uuid,
    pub package_id: Uuid,
    pub priority: PriorityLevel,
    pub courier_id: Option<Uuid>,
    pub requested_pickup_date: Option<DateTime<Utc>>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub estimated_price: Decimal,
}

impl NewOrder {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut form = FormParser::new(raw);
        let pickup_address_id = form.required_uuid("pickup_address_id");
        let delivery_address_id = form.required_uuid("delivery_address_id");
        let package_id = form.required_uuid("package_id");
        let priority = form.enumerated::<PriorityLevel>("priority", "priority level");
        let courier_id = form.optional_uuid("courier_id");
        let requested_pickup_date = form.optional_datetime("requested_pickup_date");
        let estimated_delivery_date = form.optional_datetime("estimated_delivery_date");
        let estimated_price = form.non_negative_decimal("estimated_price");
        form.finish(|| {
            Some(Self {
                pickup_address_id: pickup_address_id?,
                delivery_address_id: delivery_address_id?,
                package_id: package_id?,
                priority: priority?,
                courier_id,
                requested_pickup_date,
                estimated_delivery_date,
                estimated_price: estimated_price?,
            })
        })
    }

    /// The subset of order fields a booking form carries; the three foreign
    /// keys come from rows inserted in the same transaction.
    fn from_booking_form(raw: &RawForm) -> Result<BookingFields, FieldErrors> {
        let mut form = FormParser::new(raw);
        let priority = form.enumerated::<PriorityLevel>("priority", "priority level");
        let requested_pickup_date = form.optional_datetime("requested_pickup_date");
        let estimated_delivery_date = form.optional_datetime("estimated_delivery_date");
        let estimated_price = form.non_negative_decimal("estimated_price");
        form.finish(|| {
            Some(BookingFields {
                priority: priority?,
                requested_pickup_date,
                estimated_delivery_date,
                estimated_price: estimated_price?,
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct BookingFields {
    pub priority: PriorityLevel,
    pub requested_pickup_date: Option<DateTime<Utc>>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub estimated_price: Decimal,
}

/// One-shot booking: both addresses, the package and the order arrive on a
/// single flat form, distinguished by `pickup_`/`delivery_` prefixes, and
/// are written in one transaction.
#[derive(Debug, Clone)]
pub struct BookShipmentForm {
    pub pickup: NewAddress,
    pub delivery: NewAddress,
    pub package: NewPackage,
    pub order: BookingFields,
}

impl BookShipmentForm {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        let pickup = NewAddress::from_form_scoped(raw, "pickup_");
        let delivery = NewAddress::from_form_scoped(raw, "delivery_");
        let package = NewPackage::from_form(raw);
        let order = NewOrder::from_booking_form(raw);

        match (pickup, delivery, package, order) {
            (Ok(pickup), Ok(delivery), Ok(package), Ok(order)) => Ok(Self {
                pickup,
                delivery,
                package,
                order,
            }),
            (pickup, delivery, package, order) => {
                let mut errors = FieldErrors::new();
                for sub_errors in [pickup.err(), delivery.err(), package.err(), order.err()]
                    .into_iter()
                    .flatten()
                {
                    merge_errors(&mut errors, sub_errors);
                }
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Clone, ToSchema)]
pub struct EstimateRequest {
    pub package_type: PackageType,
    pub priority: PriorityLevel,
    pub weight_kg: Decimal,
    pub distance_km: Decimal,
}

impl EstimateRequest {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut form = FormParser::new(raw);
        let package_type = form.enumerated::<PackageType>("package_type", "package type");
        let priority = form.enumerated::<PriorityLevel>("priority", "priority level");
        let weight_kg = form.positive_decimal("weight_kg");
        let distance_km = form.non_negative_decimal("distance_km");
        form.finish(|| {
            Some(Self {
                package_type: package_type?,
                priority: priority?,
                weight_kg: weight_kg?,
                distance_km: distance_km?,
            })
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Estimate {
    pub package_type: PackageType,
    pub priority: PriorityLevel,
    pub estimated_price: Decimal,
}

#[derive(Debug, Clone, ToSchema)]
pub struct AssignCourierForm {
    pub courier_id: Uuid,
}

impl AssignCourierForm {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut form = FormParser::new(raw);
        let courier_id = form.required_uuid("courier_id");
        form.finish(|| {
            Some(Self {
                courier_id: courier_id?,
            })
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

/// An order joined with everything a detail view needs: the package, both
/// addresses and the full tracking history in insertion order.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    pub package: Package,
    pub pickup_address: Address,
    pub delivery_address: Address,
    pub tracking: Vec<TrackingEvent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookedShipment {
    pub order: Order,
    pub package: Package,
    pub pickup_address: Address,
    pub delivery_address: Address,
}
