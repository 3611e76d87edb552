use crate::app_config::{AppConfig, Environment};
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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;
    let openai_api_key = require("OPENAI_API_KEY")?;

    let env = parse_environment(&or_default("YTI_ENV", "development"));

    let bind_addr = parse("YTI_BIND_ADDR", "0.0.0.0:5001")?;
    let log_level = or_default("YTI_LOG_LEVEL", "info");

    let youtube_timeout_secs = parse_u64("YTI_YOUTUBE_TIMEOUT_SECS", "30")?;
    let max_comments = parse_usize("YTI_MAX_COMMENTS", "500")?;
    if max_comments == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "YTI_MAX_COMMENTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let llm_base_url = or_default("YTI_LLM_BASE_URL", "https://api.openai.com/v1");
    let llm_model = or_default("YTI_LLM_MODEL", "gpt-4o-mini");
    let llm_timeout_secs = parse_u64("YTI_LLM_TIMEOUT_SECS", "60")?;
    let llm_max_retries = parse_u32("YTI_LLM_MAX_RETRIES", "2")?;
    let llm_retry_backoff_base_ms = parse_u64("YTI_LLM_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        youtube_api_key,
        youtube_timeout_secs,
        max_comments,
        openai_api_key,
        llm_base_url,
        llm_model,
        llm_timeout_secs,
        llm_max_retries,
        llm_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
