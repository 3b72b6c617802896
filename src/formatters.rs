use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::constants::DEFAULT_ICON;
use crate::models::{CurrentConditions, ForecastDay};
use crate::state::DisplayState;

/// Condition category to icon class
const ICONS: &[(&str, &str)] = &[
    ("Clear", "fas fa-sun"),
    ("Clouds", "fas fa-cloud"),
    ("Rain", "fas fa-cloud-rain"),
    ("Drizzle", "fas fa-cloud-rain"),
    ("Thunderstorm", "fas fa-bolt"),
    ("Snow", "fas fa-snowflake"),
    ("Mist", "fas fa-smog"),
    ("Smoke", "fas fa-smog"),
    ("Haze", "fas fa-smog"),
    ("Dust", "fas fa-smog"),
    ("Fog", "fas fa-smog"),
    ("Sand", "fas fa-smog"),
    ("Ash", "fas fa-smog"),
    ("Squall", "fas fa-wind"),
    ("Tornado", "fas fa-tornado"),
];

/// Returns the icon class for a condition category, or the cloud icon
pub fn icon_for(condition: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(category, _)| *category == condition)
        .map_or(DEFAULT_ICON, |(_, icon)| *icon)
}

/// Rounds half-way values up, so 21.5 becomes 22 and -0.5 becomes 0
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}\u{00b0}C", round_half_up(celsius))
}

/// Converts m/s to km/h
pub fn format_wind_speed(metres_per_second: f64) -> String {
    format!("{} km/h", round_half_up(metres_per_second * 3.6))
}

pub fn format_visibility(metres: Option<u32>) -> String {
    match metres {
        Some(m) => format!("{:.1} km", f64::from(m) / 1000.0),
        None => "N/A".to_string(),
    }
}

/// "Monday, June 15, 2024 at 03:00 PM"
pub fn format_date(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%A, %B %-d, %Y at %I:%M %p")
        .to_string()
}

/// "Sat, Jun 15"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "06:42 AM"
pub fn format_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%I:%M %p").to_string()
}

/// Formats current conditions into a human-readable string
pub fn format_conditions(current: &CurrentConditions) -> String {
    let offset = current.utc_offset;
    format!(
        "{}, {}\n{}\n{}  {} ({})\n\n  Feels like: {}\n  Humidity: {}%\n  Wind: {}\n  Pressure: {} hPa\n  Visibility: {}\n  UV index: N/A\n  Sunrise: {}\n  Sunset: {}\n",
        current.place,
        current.country,
        format_date(current.observed_at, offset),
        format_temperature(current.temperature),
        current.description,
        icon_for(&current.condition),
        format_temperature(current.feels_like),
        round_half_up(current.humidity),
        format_wind_speed(current.wind_speed),
        round_half_up(current.pressure),
        format_visibility(current.visibility),
        format_time(current.sunrise, offset),
        format_time(current.sunset, offset),
    )
}

/// Formats the daily forecast cards
pub fn format_forecast(days: &[ForecastDay]) -> String {
    let mut output = String::from("5-Day Forecast:\n\n");
    if days.is_empty() {
        output.push_str("  No forecast available.\n");
        return output;
    }
    for day in days {
        output.push_str(&format!(
            "{}:\n  Icon: {}\n  Temperature: {}\n  Conditions: {}\n\n",
            format_day(day.date),
            icon_for(&day.condition),
            format_temperature(day.temperature),
            day.description
        ));
    }
    output
}

/// Renders the whole display region
pub fn format_display(state: &DisplayState) -> String {
    match state {
        DisplayState::Idle => {
            "No weather loaded yet. Search for a city or use your location.".to_string()
        }
        DisplayState::Loading => "Loading weather data...".to_string(),
        DisplayState::Success { current, forecast } => {
            format!("{}\n{}", format_conditions(current), format_forecast(forecast))
        }
        DisplayState::Error(message) => message.clone(),
    }
}
