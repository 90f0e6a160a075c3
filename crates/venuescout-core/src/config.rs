use crate::app_config::AppConfig;
use crate::ConfigError;

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
/// The API key is optional here; only `discover` needs it, and it checks
/// via [`AppConfig::require_places_api_key`] before touching the network.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let places_api_key = lookup("GOOGLE_PLACES_API_KEY").ok();
    let log_level = or_default("VENUESCOUT_LOG_LEVEL", "info");
    let config_path = PathBuf::from(or_default("VENUESCOUT_CONFIG_PATH", "./config/venues.yaml"));
    let output_path = PathBuf::from(or_default("VENUESCOUT_OUTPUT_PATH", "data/friday.json"));

    let request_timeout_secs = parse_u64("VENUESCOUT_REQUEST_TIMEOUT_SECS", "15")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VENUESCOUT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("VENUESCOUT_USER_AGENT", "Mozilla/5.0");
    let page_token_delay_ms = parse_u64("VENUESCOUT_PAGE_TOKEN_DELAY_MS", "2000")?;
    let max_retries = parse_u32("VENUESCOUT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("VENUESCOUT_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        places_api_key,
        log_level,
        config_path,
        output_path,
        request_timeout_secs,
        user_agent,
        page_token_delay_ms,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
