use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single HTTP call to the weather API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed with status: {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Location service errors
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location service is not supported")]
    Unsupported,
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location service unavailable: {0}")]
    Unavailable(String),
}

/// Everything that can end a weather lookup.
///
/// Only `Forecast` is recoverable: the pipeline logs it and keeps the
/// current conditions. All other variants become the single error banner.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("OpenWeatherMap API key is not configured")]
    MissingCredential,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("current conditions request failed: {0}")]
    Request(#[source] ApiError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("forecast unavailable: {0}")]
    Forecast(#[source] ApiError),
    #[error("invalid input: {0}")]
    Validation(String),
}

impl WeatherError {
    /// Message shown in the error banner
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::MissingCredential => {
                "Please add your OpenWeatherMap API key: set OPENWEATHER_API_KEY. \
                 Get a free API key from openweathermap.org"
                    .to_string()
            }
            WeatherError::NotFound(entity) => format!("{} not found", entity),
            WeatherError::Request(_) => "Failed to fetch weather data".to_string(),
            WeatherError::Location(LocationError::Unsupported) => {
                "Geolocation is not supported on this host".to_string()
            }
            WeatherError::Location(_) => {
                "Unable to get your location. Please enter city manually.".to_string()
            }
            WeatherError::Forecast(_) => "Forecast not available".to_string(),
            WeatherError::Validation(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(WeatherError::NotFound("City").user_message(), "City not found");
        assert_eq!(
            WeatherError::NotFound("Location").user_message(),
            "Location not found"
        );
    }

    #[test]
    fn location_failures_ask_for_manual_entry() {
        let denied = WeatherError::from(LocationError::PermissionDenied);
        let down = WeatherError::from(LocationError::Unavailable("timeout".into()));
        for err in [denied, down] {
            assert_eq!(
                err.user_message(),
                "Unable to get your location. Please enter city manually."
            );
        }
        assert_eq!(
            WeatherError::from(LocationError::Unsupported).user_message(),
            "Geolocation is not supported on this host"
        );
    }

    #[test]
    fn request_failures_hide_transport_details() {
        let err = WeatherError::Request(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.user_message(), "Failed to fetch weather data");
        assert!(err.to_string().contains("500"));
    }
}
