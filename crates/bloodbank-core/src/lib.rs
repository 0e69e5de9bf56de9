pub mod app_config;
pub mod banks;
pub mod config;
pub mod geo;

pub use app_config::{AppConfig, Environment};
pub use banks::{nearby, BloodBank, Location, DEFAULT_NEARBY_LIMIT};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, EARTH_RADIUS_KM};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
