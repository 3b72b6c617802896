/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-widget/0.1.0";

/// OpenWeatherMap 2.5 API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// IP geolocation endpoint used for "use my location"
pub const IPINFO_URL: &str = "https://ipinfo.io/json";

/// Key value shipped in sample configurations; treated as "not configured"
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Units requested from the API. Temperatures arrive in °C, wind in m/s.
pub const UNITS: &str = "metric";

/// Hour of day a forecast sample must fall on to represent its day
pub const MIDDAY_HOUR: u32 = 12;

/// Maximum number of forecast days shown
pub const MAX_FORECAST_DAYS: usize = 5;

/// Icon shown for condition categories missing from the icon table
pub const DEFAULT_ICON: &str = "fas fa-cloud";
