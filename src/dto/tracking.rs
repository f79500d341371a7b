use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::forms::{FieldErrors, FormParser, RawForm};
use crate::models::{OrderStatus, TrackingEvent};

#[derive(Debug, Clone, ToSchema)]
pub struct NewTrackingEvent {
    pub status: OrderStatus,
    pub message: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Server-assigned when not supplied.
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewTrackingEvent {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut form = FormParser::new(raw);
        let status = form.enumerated::<OrderStatus>("status", "order status");
        let message = form.optional_text("message", 2000);
        let latitude = form.optional_f64("latitude");
        let longitude = form.optional_f64("longitude");
        let timestamp = form.optional_datetime("timestamp");
        form.finish(|| {
            Some(Self {
                status: status?,
                message,
                latitude,
                longitude,
                timestamp,
            })
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackingHistory {
    pub items: Vec<TrackingEvent>,
}
