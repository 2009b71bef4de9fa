use std::net::SocketAddr;

use crate::app_config::{AppConfig, Environment};
use crate::catalog::OptionPolicy;
use crate::delivery::DistanceBand;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load only the default distance band.
///
/// Offline commands need the band but not the partner credentials, so this
/// reads `CATPRICE_DEFAULT_KM_BAND` alone (after loading `.env`).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the variable is set to an
/// unknown band code.
pub fn load_default_band() -> Result<DistanceBand, ConfigError> {
    dotenvy::dotenv().ok();
    default_band_from(&|key: &str| std::env::var(key))
}

/// `CATPRICE_DEFAULT_KM_BAND`, defaulting to `UP_TO_2`.
fn default_band_from<F>(lookup: &F) -> Result<DistanceBand, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("CATPRICE_DEFAULT_KM_BAND")
        .unwrap_or_else(|_| DistanceBand::UpTo2.code().to_string())
        .parse::<DistanceBand>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "CATPRICE_DEFAULT_KM_BAND".to_string(),
            reason: e.to_string(),
        })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let cardapioweb_base_url = require("CARDAPIOWEB_BASE_URL")?
        .trim_end_matches('/')
        .to_string();
    if !cardapioweb_base_url.starts_with("http://") && !cardapioweb_base_url.starts_with("https://")
    {
        return Err(invalid(
            "CARDAPIOWEB_BASE_URL",
            format!("expected an http(s) URL, got {cardapioweb_base_url:?}"),
        ));
    }
    let cardapioweb_api_key = require("CARDAPIOWEB_API_KEY")?;

    let env = parse_environment(&or_default("CATPRICE_ENV", "development"))?;

    let bind_addr = or_default("CATPRICE_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CATPRICE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CATPRICE_LOG_LEVEL", "info");

    let client_timeout_secs = parse_u64("CATPRICE_CLIENT_TIMEOUT_SECS", "30")?;
    let client_user_agent = or_default(
        "CATPRICE_CLIENT_USER_AGENT",
        "catprice/0.1 (catalog-pricing)",
    );
    let client_max_retries = parse_u32("CATPRICE_CLIENT_MAX_RETRIES", "2")?;
    let client_backoff_base_ms = parse_u64("CATPRICE_CLIENT_BACKOFF_BASE_MS", "500")?;

    let default_band = default_band_from(&lookup)?;
    let option_policy = or_default(
        "CATPRICE_OPTION_POLICY",
        OptionPolicy::AlwaysExplode.as_str(),
    )
    .parse::<OptionPolicy>()
    .map_err(|e| invalid("CATPRICE_OPTION_POLICY", e.to_string()))?;

    Ok(AppConfig {
        cardapioweb_base_url,
        cardapioweb_api_key,
        env,
        bind_addr,
        log_level,
        client_timeout_secs,
        client_user_agent,
        client_max_retries,
        client_backoff_base_ms,
        default_band,
        option_policy,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CATPRICE_ENV".to_string(),
            reason: format!("expected development, test or production, got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
