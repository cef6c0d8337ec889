use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.energyandcleanair.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CITIES: [&str; 2] = ["Bangkok", "Kuala Lumpur"];

const API_URL_ENV_VAR: &str = "TRAJECTORIES_API_URL";
const TIMEOUT_ENV_VAR: &str = "TRAJECTORIES_TIMEOUT_SECS";
const CITIES_ENV_VAR: &str = "TRAJECTORIES_CITIES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} must be \"<lat>,<lng>\" within [-90, 90] and [-180, 180], got {value:?}")]
    InvalidCenter { name: &'static str, value: String },

    #[error("{name} must be a zoom level between 0 and 22, got {value:?}")]
    InvalidZoom { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct TrajectoryClientParams {
    pub api_url: String,
    pub timeout: Duration,

    /// City names offered for selection, `None` keeps every city
    pub city_allow_list: Option<Vec<String>>,
}

impl Default for TrajectoryClientParams {
    fn default() -> Self {
        Self {
            api_url: String::from(DEFAULT_API_URL),
            timeout: DEFAULT_TIMEOUT,
            city_allow_list: Some(DEFAULT_CITIES.iter().map(|name| name.to_string()).collect()),
        }
    }
}

impl TrajectoryClientParams {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds params from any variable source, unset variables fall back to
    /// the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut params = Self::default();

        if let Some(api_url) = lookup(API_URL_ENV_VAR) {
            params.api_url = parse_api_url(API_URL_ENV_VAR, &api_url)?;
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV_VAR) {
            params.timeout = parse_timeout_secs(TIMEOUT_ENV_VAR, &timeout)?;
        }

        if let Some(cities) = lookup(CITIES_ENV_VAR) {
            params.city_allow_list = parse_city_list(&cities);
        }

        Ok(params)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }
}

/// Accepts `http://` and `https://` base URLs, `name` is the setting reported
/// on error.
pub fn parse_api_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        })
    }
}

fn parse_timeout_secs(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 && secs <= u32::MAX as f64 => {
            Ok(Duration::from_secs_f64(secs))
        }
        _ => Err(ConfigError::InvalidTimeout {
            name,
            value: value.to_string(),
        }),
    }
}

/// Comma separated names, an empty list disables filtering.
pub fn parse_city_list(value: &str) -> Option<Vec<String>> {
    let names: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();

    if names.is_empty() { None } else { Some(names) }
}
