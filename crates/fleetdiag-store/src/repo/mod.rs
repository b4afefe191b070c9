pub mod bookings;
pub mod users;
pub mod vehicles;

pub use bookings::{BookingNew, BookingsRepo};
pub use users::{UserNew, UsersRepo};
pub use vehicles::VehiclesRepo;
