use utoipa::ToSchema;

use crate::forms::{FieldErrors, FormParser, RawForm};

#[derive(Debug, Clone, ToSchema)]
pub struct NewCourierProfile {
    pub vehicle_type: String,
    pub license_plate: String,
}

impl NewCourierProfile {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut form = FormParser::new(raw);
        let vehicle_type = form.required_text("vehicle_type", 50);
        let license_plate = form.required_text("license_plate", 20);
        form.finish(|| {
            Some(Self {
                vehicle_type: vehicle_type?,
                license_plate: license_plate?,
            })
        })
    }
}

#[derive(Debug, Clone, ToSchema)]
pub struct AvailabilityForm {
    pub is_available: bool,
}

impl AvailabilityForm {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut form = FormParser::new(raw);
        let is_available = form.required_bool("is_available");
        form.finish(|| {
            Some(Self {
                is_available: is_available?,
            })
        })
    }
}
