use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_ROUTING_BASE_URL: &str = "https://graphhopper.com/api/1/route";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Kept separate from the real environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("BLOODBANK_ENV", "development"))?;

    let bind_addr = or_default("BLOODBANK_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BLOODBANK_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("BLOODBANK_LOG_LEVEL", "info");
    let dataset_path = PathBuf::from(or_default(
        "BLOODBANK_DATASET_PATH",
        "./data/blood_banks.csv",
    ));

    // A blank key is treated the same as an absent one.
    let graphhopper_api_key = lookup("GRAPHHOPPER_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let routing_base_url = or_default("BLOODBANK_ROUTING_BASE_URL", DEFAULT_ROUTING_BASE_URL);
    if routing_base_url.trim().is_empty() {
        return Err(invalid(
            "BLOODBANK_ROUTING_BASE_URL",
            "must not be empty".to_string(),
        ));
    }

    let routing_timeout_secs = or_default("BLOODBANK_ROUTING_TIMEOUT_SECS", "15")
        .parse::<u64>()
        .map_err(|e| invalid("BLOODBANK_ROUTING_TIMEOUT_SECS", e.to_string()))?;
    if routing_timeout_secs == 0 {
        return Err(invalid(
            "BLOODBANK_ROUTING_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        dataset_path,
        graphhopper_api_key,
        routing_base_url,
        routing_timeout_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BLOODBANK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
