use crate::app_config::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_OUTPUT_PATH};
use crate::ConfigError;

/// Smallest accepted grid step; anything finer would sample millions of
/// points per postal code.
const MIN_GRID_STEP_DEGREES: f64 = 1e-6;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
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
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| invalid(var, format!("expected true/false, got \"{raw}\"")))
    };

    let google_maps_api_key = require("GOOGLE_MAPS_API_KEY")?;
    let api_base_url = or_default("ZIPSCOUT_API_BASE_URL", DEFAULT_API_BASE_URL);
    let log_level = or_default("ZIPSCOUT_LOG_LEVEL", "info");

    let grid_step_degrees = parse_f64("ZIPSCOUT_GRID_STEP_DEGREES", "0.02")?;
    if !grid_step_degrees.is_finite() || grid_step_degrees < MIN_GRID_STEP_DEGREES {
        return Err(invalid(
            "ZIPSCOUT_GRID_STEP_DEGREES",
            format!(
                "must be a finite number of degrees >= {MIN_GRID_STEP_DEGREES}, got {grid_step_degrees}"
            ),
        ));
    }

    let search_radius_meters = parse_u32("ZIPSCOUT_SEARCH_RADIUS_METERS", "2000")?;
    if search_radius_meters == 0 {
        return Err(invalid(
            "ZIPSCOUT_SEARCH_RADIUS_METERS",
            "must be greater than zero".to_string(),
        ));
    }

    let page_token_delay_ms = parse_u64("ZIPSCOUT_PAGE_TOKEN_DELAY_MS", "2000")?;
    let details_interval_ms = parse_u64("ZIPSCOUT_DETAILS_INTERVAL_MS", "100")?;
    let request_timeout_secs = parse_u64("ZIPSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ZIPSCOUT_USER_AGENT", "zipscout/0.1 (business-discovery)");
    let output_path = PathBuf::from(or_default("ZIPSCOUT_OUTPUT_PATH", DEFAULT_OUTPUT_PATH));
    let skip_failed_zips = parse_bool("ZIPSCOUT_SKIP_FAILED_ZIPS", "false")?;

    Ok(AppConfig {
        google_maps_api_key,
        api_base_url,
        log_level,
        grid_step_degrees,
        search_radius_meters,
        page_token_delay_ms,
        details_interval_ms,
        request_timeout_secs,
        user_agent,
        output_path,
        skip_failed_zips,
    })
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
