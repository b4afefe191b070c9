use crate::domain::category::{normalize_vehicle_type, VehicleCategory, VehicleType};
use serde::Serialize;

/// How a row's stored type relates to the collection it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum StoredTypeCheck {
    Matches,
    Missing,
    Unrecognized { token: String },
    Mismatch { stored: VehicleCategory },
}

impl StoredTypeCheck {
    pub fn is_issue(&self) -> bool {
        !matches!(self, StoredTypeCheck::Matches)
    }

    pub fn describe(&self, collection: VehicleCategory) -> String {
        match self {
            StoredTypeCheck::Matches => format!("type matches {collection}"),
            StoredTypeCheck::Missing => "no vehicle type stored".to_string(),
            StoredTypeCheck::Unrecognized { token } => {
                format!("unrecognized vehicle type {token:?}")
            }
            StoredTypeCheck::Mismatch { stored } => {
                format!("stored type {stored} but lives in {}", collection.collection())
            }
        }
    }
}

pub fn check_stored_type(collection: VehicleCategory, stored: Option<&str>) -> StoredTypeCheck {
    match normalize_vehicle_type(stored) {
        None => StoredTypeCheck::Missing,
        Some(VehicleType::Unrecognized(token)) => StoredTypeCheck::Unrecognized { token },
        Some(VehicleType::Canonical(category)) if category == collection => {
            StoredTypeCheck::Matches
        }
        Some(VehicleType::Canonical(stored)) => StoredTypeCheck::Mismatch { stored },
    }
}

#[cfg(test)]
mod tests {
    use super::{check_stored_type, StoredTypeCheck};
    use crate::domain::category::VehicleCategory;

    #[test]
    fn plural_spelling_still_matches() {
        let check = check_stored_type(VehicleCategory::Scooty, Some("Scooters"));
        assert_eq!(check, StoredTypeCheck::Matches);
        assert!(!check.is_issue());
    }

    #[test]
    fn wrong_collection_is_mismatch() {
        let check = check_stored_type(VehicleCategory::Car, Some("bike"));
        assert_eq!(
            check,
            StoredTypeCheck::Mismatch {
                stored: VehicleCategory::Bike
            }
        );
        assert_eq!(check.describe(VehicleCategory::Car), "stored type bike but lives in cars");
    }

    #[test]
    fn blank_and_unknown_are_issues() {
        assert_eq!(check_stored_type(VehicleCategory::Bike, None), StoredTypeCheck::Missing);
        assert_eq!(check_stored_type(VehicleCategory::Bike, Some(" ")), StoredTypeCheck::Missing);
        assert_eq!(
            check_stored_type(VehicleCategory::Bike, Some("Truck")),
            StoredTypeCheck::Unrecognized {
                token: "truck".to_string()
            }
        );
    }
}
