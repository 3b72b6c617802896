use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub coord: Coord,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    pub main: MainReadings,
    #[serde(default)]
    pub visibility: Option<u32>,
    pub wind: Wind,
    pub dt: i64,
    pub sys: Sys,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionEntry {
    /// Condition category, e.g. "Rain"
    pub main: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    /// Formatted sample time, "YYYY-MM-DD HH:MM:SS"
    #[serde(default)]
    pub dt_txt: String,
    pub main: SampleReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SampleReadings {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub timezone: i32,
}

// ============================================================================
// ipinfo.io Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct IpLocationResponse {
    /// "latitude,longitude"
    #[serde(default)]
    pub loc: String,
    #[serde(default)]
    pub city: String,
}

impl IpLocationResponse {
    pub fn coordinates(&self) -> Option<Coordinates> {
        let (lat, lon) = self.loc.split_once(',')?;
        Some(Coordinates {
            latitude: lat.trim().parse().ok()?,
            longitude: lon.trim().parse().ok()?,
        })
    }
}

// ============================================================================
// Widget Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coord> for Coordinates {
    fn from(coord: Coord) -> Self {
        Self {
            latitude: coord.lat,
            longitude: coord.lon,
        }
    }
}

/// What the user asked for: a place name or a position, never both
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Noun used when the API cannot find the query
    pub fn entity(&self) -> &'static str {
        match self {
            LocationQuery::City(_) => "City",
            LocationQuery::Coordinates(_) => "Location",
        }
    }
}

/// Snapshot of one current-conditions response
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub place: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    /// Metres per second, as delivered in metric units
    pub wind_speed: f64,
    pub pressure: f64,
    /// Metres; absent for some stations
    pub visibility: Option<u32>,
    pub condition: String,
    pub description: String,
    pub observed_at: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub utc_offset: FixedOffset,
}

impl From<CurrentWeatherResponse> for CurrentConditions {
    fn from(response: CurrentWeatherResponse) -> Self {
        let condition = response.weather.into_iter().next().unwrap_or_default();
        Self {
            place: response.name,
            country: response.sys.country,
            coordinates: response.coord.into(),
            temperature: response.main.temp,
            feels_like: response.main.feels_like,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
            pressure: response.main.pressure,
            visibility: response.visibility,
            condition: condition.main,
            description: condition.description,
            observed_at: timestamp(response.dt),
            sunrise: timestamp(response.sys.sunrise),
            sunset: timestamp(response.sys.sunset),
            utc_offset: utc_offset(response.timezone),
        }
    }
}

/// One row of the daily forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub condition: String,
    pub description: String,
}

/// Converts unix seconds, clamping out-of-range values to the epoch
pub fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Converts a shift in seconds to an offset, falling back to UTC
pub fn utc_offset(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix())
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchCityRequest {
    /// City name as typed by the user, e.g. "London" or "Paris,FR"
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CoordinatesRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "base": "stations",
        "main": {"temp": 21.6, "feels_like": 21.2, "temp_min": 20.1, "temp_max": 22.8,
                 "pressure": 1012, "humidity": 64},
        "visibility": 10000,
        "wind": {"speed": 5.0, "deg": 240},
        "clouds": {"all": 75},
        "dt": 1718460000,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1718423000, "sunset": 1718482800},
        "timezone": 3600,
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn current_response_maps_to_conditions() {
        let response: CurrentWeatherResponse = serde_json::from_str(LONDON).unwrap();
        let current = CurrentConditions::from(response);

        assert_eq!(current.place, "London");
        assert_eq!(current.country, "GB");
        assert_eq!(current.condition, "Rain");
        assert_eq!(current.description, "light rain");
        assert_eq!(current.coordinates.latitude, 51.5085);
        assert_eq!(current.coordinates.longitude, -0.1257);
        assert_eq!(current.pressure, 1012.0);
        assert_eq!(current.visibility, Some(10000));
        assert_eq!(current.utc_offset.local_minus_utc(), 3600);
        assert_eq!(current.sunrise.timestamp(), 1718423000);
    }

    #[test]
    fn missing_weather_entry_leaves_condition_empty() {
        let json = LONDON.replace(
            r#"[{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]"#,
            "[]",
        );
        let response: CurrentWeatherResponse = serde_json::from_str(&json).unwrap();
        let current = CurrentConditions::from(response);
        assert!(current.condition.is_empty());
    }

    #[test]
    fn ip_location_parses_loc_field() {
        let response = IpLocationResponse {
            loc: "48.8534,2.3488".into(),
            city: "Paris".into(),
        };
        assert_eq!(
            response.coordinates(),
            Some(Coordinates {
                latitude: 48.8534,
                longitude: 2.3488
            })
        );

        let broken = IpLocationResponse {
            loc: "somewhere".into(),
            city: String::new(),
        };
        assert_eq!(broken.coordinates(), None);
    }

    #[test]
    fn query_entity_names() {
        assert_eq!(LocationQuery::City("Oslo".into()).entity(), "City");
        let at = Coordinates {
            latitude: 1.0,
            longitude: 2.0,
        };
        assert_eq!(LocationQuery::Coordinates(at).entity(), "Location");
    }
}
