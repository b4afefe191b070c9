use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unrecognized vehicle type: {0}")]
    UnrecognizedVehicleType(String),
    #[error("vehicle type is required")]
    MissingVehicleType,
    #[error("vehicle name is required")]
    EmptyVehicleName,
    #[error("invalid price per day: {0}")]
    InvalidPrice(i64),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}
