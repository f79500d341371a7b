use utoipa::ToSchema;

use crate::forms::{FieldErrors, FormParser, RawForm};

/// Validated address fields, ready to insert. Produced only by
/// [`NewAddress::from_form`]; there is no other way in.
#[derive(Debug, Clone, ToSchema)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl NewAddress {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        Self::from_form_scoped(raw, "")
    }

    /// Parse with a field prefix, for forms carrying more than one address
    /// (`pickup_street`, `delivery_street`, ...). Field names match what the
    /// booking forms have always submitted, `zipCode` included.
    pub fn from_form_scoped(raw: &RawForm, prefix: &str) -> Result<Self, FieldErrors> {
        let mut form = FormParser::scoped(raw, prefix);
        let street = form.required_text("street", 255);
        let city = form.required_text("city", 100);
        let state = form.required_text("state", 50);
        let zip_code = form.required_text("zipCode", 10);
        let country = form
            .optional_text("country", 50)
            .unwrap_or_else(|| "USA".to_string());
        let latitude = form.optional_f64("latitude");
        let longitude = form.optional_f64("longitude");
        form.finish(|| {
            Some(Self {
                street: street?,
                city: city?,
                state: state?,
                zip_code: zip_code?,
                country,
                latitude,
                longitude,
            })
        })
    }
}
