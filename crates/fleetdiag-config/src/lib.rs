use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use fleetdiag_core::domain::{normalize_email, VehicleId};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "fleetdiag";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BOOKINGS_LIMIT: i64 = 20;
pub const MAX_BOOKINGS_LIMIT: i64 = 500;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database_path: Option<PathBuf>,
    pub diagnostics: DiagnosticsConfig,
    pub normalization: NormalizationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    pub user_email: Option<String>,
    pub vehicle_id: Option<VehicleId>,
    pub bookings_limit: i64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            user_email: None,
            vehicle_id: None,
            bookings_limit: DEFAULT_BOOKINGS_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationConfig {
    pub strict: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid database_path value: {0}")]
    InvalidDatabasePath(PathBuf),
    #[error("invalid diagnostics.user_email value: {0}")]
    InvalidUserEmail(String),
    #[error("invalid diagnostics.vehicle_id value: {0}")]
    InvalidVehicleId(String),
    #[error("invalid diagnostics.bookings_limit value: {0}")]
    InvalidBookingsLimit(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    diagnostics: Option<DiagnosticsFile>,
    normalization: Option<NormalizationFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiagnosticsFile {
    user_email: Option<String>,
    vehicle_id: Option<String>,
    bookings_limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NormalizationFile {
    strict: Option<bool>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(path) = parsed.database_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidDatabasePath(path));
        }
        config.database_path = Some(path);
    }

    if let Some(diagnostics) = parsed.diagnostics {
        if let Some(email) = diagnostics.user_email {
            let normalized =
                normalize_email(&email).map_err(|_| ConfigError::InvalidUserEmail(email))?;
            config.diagnostics.user_email = Some(normalized);
        }
        if let Some(raw) = diagnostics.vehicle_id {
            let id = VehicleId::from_str(&raw).map_err(|_| ConfigError::InvalidVehicleId(raw))?;
            config.diagnostics.vehicle_id = Some(id);
        }
        if let Some(limit) = diagnostics.bookings_limit {
            if limit <= 0 || limit > MAX_BOOKINGS_LIMIT {
                return Err(ConfigError::InvalidBookingsLimit(limit));
            }
            config.diagnostics.bookings_limit = limit;
        }
    }

    if let Some(normalization) = parsed.normalization {
        if let Some(strict) = normalization.strict {
            config.normalization.strict = strict;
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
