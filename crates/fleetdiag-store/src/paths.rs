use crate::error::{Result, StoreError};
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "fleetdiag";
const DB_FILENAME: &str = "rental.sqlite3";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path.join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

/// Uses `explicit` when given, otherwise the default data location. Nothing is
/// created on disk.
pub fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(StoreError::InvalidDataPath(path));
            }
            Ok(path)
        }
        None => Ok(data_dir()?.join(DB_FILENAME)),
    }
}
