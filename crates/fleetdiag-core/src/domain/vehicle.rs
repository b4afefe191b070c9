use crate::domain::category::VehicleCategory;
use crate::domain::ids::VehicleId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Collection the row was read from.
    pub category: VehicleCategory,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    /// Type string as stored on the row; may disagree with `category`.
    pub vehicle_type: Option<String>,
    pub price_per_day_cents: i64,
    pub available: bool,
    pub created_at: i64,
}

/// Validated input for a new vehicle row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub category: VehicleCategory,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price_per_day_cents: i64,
    pub available: bool,
}

impl VehicleDraft {
    pub fn new(category: VehicleCategory, name: &str) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyVehicleName);
        }
        Ok(Self {
            category,
            name: name.to_string(),
            brand: None,
            model: None,
            price_per_day_cents: 0,
            available: true,
        })
    }

    pub fn with_brand(mut self, brand: Option<&str>) -> Self {
        self.brand = clean_optional(brand);
        self
    }

    pub fn with_model(mut self, model: Option<&str>) -> Self {
        self.model = clean_optional(model);
        self
    }

    pub fn with_price(mut self, cents: i64) -> Result<Self, CoreError> {
        if cents < 0 {
            return Err(CoreError::InvalidPrice(cents));
        }
        self.price_per_day_cents = cents;
        Ok(self)
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}
