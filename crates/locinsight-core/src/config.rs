use crate::app_config::{AppConfig, ClassifierThresholds, Environment};
use crate::ConfigError;

const DEFAULT_SCRAPER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
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

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let parse_share = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(invalid(var, format!("{value} is outside [0, 1]")));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("LOCINSIGHT_ENV", "development"))?;

    let bind_addr = parse_addr("LOCINSIGHT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LOCINSIGHT_LOG_LEVEL", "info");
    let dataset_path = PathBuf::from(or_default("LOCINSIGHT_DATASET_PATH", "./data/stores.json"));
    let provinces_path = PathBuf::from(or_default(
        "LOCINSIGHT_PROVINCES_PATH",
        "./config/provinces.yaml",
    ));
    let histogram_top_n = parse_positive_usize("LOCINSIGHT_HISTOGRAM_TOP_N", "5")?;

    let defaults = ClassifierThresholds::default();
    let thresholds = ClassifierThresholds {
        university_share: parse_share("LOCINSIGHT_UNIVERSITY_SHARE", defaults.university_share)?,
        office_share: parse_share("LOCINSIGHT_OFFICE_SHARE", defaults.office_share)?,
        drive_through_share: parse_share(
            "LOCINSIGHT_DRIVE_THROUGH_SHARE",
            defaults.drive_through_share,
        )?,
    };

    let scraper_base_url = or_default("LOCINSIGHT_SCRAPER_BASE_URL", "https://www.starbucks.co.kr");
    let scraper_request_timeout_secs = parse_u64("LOCINSIGHT_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent =
        or_default("LOCINSIGHT_SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);
    let scraper_max_concurrent_provinces =
        parse_positive_usize("LOCINSIGHT_SCRAPER_MAX_CONCURRENT_PROVINCES", "1")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        dataset_path,
        provinces_path,
        histogram_top_n,
        thresholds,
        scraper_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_concurrent_provinces,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LOCINSIGHT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
