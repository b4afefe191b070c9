use crate::domain::category::{normalize_vehicle_type, VehicleType};
use crate::domain::ids::{BookingId, UserId, VehicleId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    /// Type string as stored on the booking row.
    pub vehicle_type: Option<String>,
    pub status: String,
    pub start_at: i64,
    pub end_at: i64,
    pub created_at: i64,
}

impl Booking {
    pub fn normalized_type(&self) -> Option<VehicleType> {
        normalize_vehicle_type(self.vehicle_type.as_deref())
    }
}
