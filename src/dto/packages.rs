use rust_decimal::Decimal;
use utoipa::ToSchema;

use crate::forms::{FieldErrors, FormParser, RawForm};
use crate::models::PackageType;

#[derive(Debug, Clone, ToSchema)]
pub struct NewPackage {
    pub package_type: PackageType,
    pub weight_kg: Decimal,
    pub dimensions: Option<String>,
    pub is_fragile: bool,
    pub special_instructions: Option<String>,
    pub declared_value: Decimal,
}

impl NewPackage {
    pub fn from_form(raw: &RawForm) -> Result<Self, FieldErrors> {
        Self::from_form_scoped(raw, "")
    }

    pub fn from_form_scoped(raw: &RawForm, prefix: &str) -> Result<Self, FieldErrors> {
        let mut form = FormParser::scoped(raw, prefix);
        let package_type = form.enumerated::<PackageType>("type", "package type");
        let weight_kg = form.positive_decimal("weightKg");
        let dimensions = form.optional_text("dimensions", 50);
        let is_fragile = form.boolean_or("isFragile", false);
        let special_instructions = form.optional_text("specialInstructions", 2000);
        let declared_value = form.non_negative_decimal_or("declaredValue", Decimal::ZERO);
        form.finish(|| {
            Some(Self {
                package_type: package_type?,
                weight_kg: weight_kg?,
                dimensions,
                is_fragile,
                special_instructions,
                declared_value,
            })
        })
    }
}
