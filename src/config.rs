use std::env;

use crate::constants::{IPINFO_URL, OPENWEATHER_API_BASE, PLACEHOLDER_API_KEY};

/// Runtime settings, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenWeatherMap API key (`OPENWEATHER_API_KEY`)
    pub api_key: Option<String>,
    /// API base URL (`OPENWEATHER_BASE_URL`)
    pub base_url: String,
    /// Whether the location service may be used (`WEATHER_GEOLOCATION`, "off" disables)
    pub geolocation: bool,
    /// IP geolocation endpoint (`WEATHER_LOCATOR_URL`)
    pub locator_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENWEATHER_API_BASE.to_string(),
            geolocation: true,
            locator_url: IPINFO_URL.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let geolocation = match lookup("WEATHER_GEOLOCATION") {
            Some(value) => !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "off" | "false" | "0" | "no"
            ),
            None => defaults.geolocation,
        };

        Self {
            api_key: lookup("OPENWEATHER_API_KEY"),
            base_url: lookup("OPENWEATHER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            geolocation,
            locator_url: lookup("WEATHER_LOCATOR_URL").unwrap_or(defaults.locator_url),
        }
    }

    /// The API key, if one is usable. Blank keys and the placeholder count as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}
