pub mod audit;

pub use audit::{check_stored_type, StoredTypeCheck};
