pub mod booking;
pub mod category;
pub mod ids;
pub mod user;
pub mod vehicle;

pub use booking::Booking;
pub use category::{
    is_valid_vehicle_type, normalize_vehicle_type, normalize_vehicle_type_strict,
    VehicleCategory, VehicleType,
};
pub use ids::{BookingId, UserId, VehicleId};
pub use user::{normalize_email, User};
pub use vehicle::{Vehicle, VehicleDraft};
