//! Configuration loading and selected-date resolution

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::model::DATE_FORMAT;

/// Environment variable consulted for the selected date
pub const SELECTED_DATE_ENV: &str = "AQVIEW_DATE";

/// Compiled fallback date used when no other tier supplies one
pub const DEFAULT_SELECTED_DATE: &str = "2020-08-14";

/// Selected-date resolution following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve_selected_date(
    cli_arg: Option<&str>,
    env_var_name: &str,
    config_file_key: Option<&str>,
) -> Result<NaiveDate> {
    // Priority 1: Command-line argument
    if let Some(value) = cli_arg {
        return parse_selected_date(value, "command line");
    }

    // Priority 2: Environment variable
    if let Ok(value) = std::env::var(env_var_name) {
        return parse_selected_date(&value, "environment");
    }

    // Priority 3: TOML config file
    if let Some(key) = config_file_key {
        if let Ok(config_path) = load_config_file() {
            if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                    if let Some(value) = config.get(key).and_then(|v| v.as_str()) {
                        return parse_selected_date(value, "config file");
                    }
                }
            }
        }
    }

    // Priority 4: Compiled default
    parse_selected_date(DEFAULT_SELECTED_DATE, "default")
}

/// Parse a selected-date value, tagging errors with where the value came from
fn parse_selected_date(value: &str, origin: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        Error::Config(format!(
            "invalid selected date {value:?} from {origin} (expected YYYY-MM-DD): {e}"
        ))
    })
}

/// Get default configuration file path for the platform
fn load_config_file() -> Result<std::path::PathBuf> {
    let config_path = if cfg!(target_os = "linux") {
        // Try ~/.config/aqview/config.toml first, then /etc/aqview/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("aqview").join("config.toml"));
        let system_config = std::path::PathBuf::from("/etc/aqview/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else {
        dirs::config_dir()
            .map(|d| d.join("aqview").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    };

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {config_path:?}"
        )))
    }
}
