//! Configuration loading for the elevator backend.
//!
//! Loads a `.env` file and environment variables prefixed with `ELEVATOR_`,
//! producing a typed [`AppConfig`], plus the building configuration JSON
//! document describing floors, operational hours, and the default resting
//! floor.

use std::{
    collections::BTreeMap,
    env, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application configuration derived from `ELEVATOR_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_api_bind_addr")]
    pub api_bind_addr: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_acquire_timeout_ms")]
    pub db_acquire_timeout_ms: u64,
    #[serde(default = "default_building_config_path")]
    pub building_config_path: PathBuf,
    #[serde(default = "default_enforce_operational_hours")]
    pub enforce_operational_hours: bool,
}

fn default_api_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "sqlite://elevator.db?mode=rwc".to_string()
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_db_acquire_timeout_ms() -> u64 {
    5000
}

fn default_building_config_path() -> PathBuf {
    PathBuf::from("config/elevator_config.json")
}

fn default_enforce_operational_hours() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_bind_addr: default_api_bind_addr(),
            log_level: default_log_level(),
            database_url: default_database_url(),
            db_max_connections: default_db_max_connections(),
            db_acquire_timeout_ms: default_db_acquire_timeout_ms(),
            building_config_path: default_building_config_path(),
            enforce_operational_hours: default_enforce_operational_hours(),
        }
    }
}

impl AppConfig {
    /// Returns the configured bind address as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.api_bind_addr.parse()
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("failed to read building config {path}: {source}")]
    BuildingConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse building config {path}: {source}")]
    BuildingConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("building config is missing default_resting_floor")]
    MissingRestingFloor,
    #[error("default_resting_floor '{floor}' is not in the configured floors list")]
    UnknownRestingFloor { floor: String },
    #[error("operational_hours.{field} '{value}' is not a valid HH:MM wall-clock time")]
    InvalidOperationalTime { field: &'static str, value: String },
    #[error(
        "operational_hours start '{start}' is after end '{end}'; windows wrapping past midnight are not supported"
    )]
    InvertedOperationalHours { start: String, end: String },
}

/// Loads [`AppConfig`] from a `.env` file and `ELEVATOR_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads configuration from `.env` and the process environment.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut layered = self.collect_env_file()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("ELEVATOR_") {
                layered.insert(stripped.to_string(), value);
            }
        }

        let api_bind_addr = layered
            .remove("API_BIND_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_api_bind_addr);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let database_url = layered
            .remove("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_database_url);
        let db_max_connections = layered
            .remove("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_max_connections);
        let db_acquire_timeout_ms = layered
            .remove("DB_ACQUIRE_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_acquire_timeout_ms);
        let building_config_path = layered
            .remove("BUILDING_CONFIG")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_building_config_path);
        let enforce_operational_hours = layered
            .remove("ENFORCE_OPERATIONAL_HOURS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_enforce_operational_hours);

        Ok(AppConfig {
            api_bind_addr,
            log_level,
            database_url,
            db_max_connections,
            db_acquire_timeout_ms,
            building_config_path,
            enforce_operational_hours,
        })
    }

    fn collect_env_file(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        let mut vars = BTreeMap::new();
        let path = self.base_dir.join(".env");

        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix("ELEVATOR_") {
                        vars.insert(stripped.to_string(), value);
                    }
                }
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(ConfigError::EnvFile { path, source }),
        }

        Ok(vars)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct BuildingConfigDocument {
    building_config: RawBuildingConfig,
}

#[derive(Debug, Deserialize)]
struct RawBuildingConfig {
    #[serde(default)]
    floors: Vec<String>,
    operational_hours: RawOperationalHours,
    default_resting_floor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOperationalHours {
    start_time: String,
    end_time: String,
}

/// Validated building configuration, immutable for the process lifetime.
///
/// Constructed once at bootstrap and injected into handlers through the
/// application state; floor and operational-hours checks are pure membership
/// and interval tests against this structure.
#[derive(Debug, Clone)]
pub struct BuildingConfig {
    floors: Vec<String>,
    default_resting_floor: String,
    hours_start: NaiveTime,
    hours_end: NaiveTime,
}

impl BuildingConfig {
    /// Loads and validates the building configuration from a JSON document.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::BuildingConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: BuildingConfigDocument =
            serde_json::from_str(&raw).map_err(|source| ConfigError::BuildingConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_raw(doc.building_config)
    }

    fn from_raw(raw: RawBuildingConfig) -> Result<Self, ConfigError> {
        let default_resting_floor = raw
            .default_resting_floor
            .ok_or(ConfigError::MissingRestingFloor)?;
        Self::new(
            raw.floors,
            &raw.operational_hours.start_time,
            &raw.operational_hours.end_time,
            default_resting_floor,
        )
    }

    /// Builds a validated configuration from its parts.
    pub fn new(
        floors: Vec<String>,
        start_time: &str,
        end_time: &str,
        default_resting_floor: String,
    ) -> Result<Self, ConfigError> {
        if !floors.contains(&default_resting_floor) {
            return Err(ConfigError::UnknownRestingFloor {
                floor: default_resting_floor,
            });
        }

        let hours_start = parse_wall_clock("start_time", start_time)?;
        let hours_end = parse_wall_clock("end_time", end_time)?;

        if hours_start > hours_end {
            return Err(ConfigError::InvertedOperationalHours {
                start: start_time.to_string(),
                end: end_time.to_string(),
            });
        }

        Ok(Self {
            floors,
            default_resting_floor,
            hours_start,
            hours_end,
        })
    }

    /// The ordered list of valid floor identifiers.
    pub fn floors(&self) -> &[String] {
        &self.floors
    }

    /// The floor the elevator is seeded to at first bootstrap.
    pub fn default_resting_floor(&self) -> &str {
        &self.default_resting_floor
    }

    /// Membership test against the configured floor set.
    pub fn is_valid_floor(&self, floor: &str) -> bool {
        self.floors.iter().any(|f| f == floor)
    }

    /// True iff the wall-clock time falls within `[start, end]` inclusive.
    pub fn is_within_operational_hours(&self, time: NaiveTime) -> bool {
        self.hours_start <= time && time <= self.hours_end
    }
}

fn parse_wall_clock(field: &'static str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ConfigError::InvalidOperationalTime {
        field,
        value: value.to_string(),
    })
}
