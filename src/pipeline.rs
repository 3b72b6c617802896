use std::sync::Arc;

use crate::client::OpenWeatherClient;
use crate::errors::{ApiError, WeatherError};
use crate::forecast::select_midday;
use crate::locator::Locator;
use crate::models::{CurrentConditions, ForecastDay, LocationQuery};
use crate::state::{DisplaySink, DisplayState};

/// Runs one lookup from query to rendered state.
///
/// Every run ends in exactly one terminal state (`Success` or `Error`) and
/// enters `Loading` at most once before it. The current-conditions request
/// decides the outcome; the forecast request that follows can only add to a
/// successful result.
pub struct FetchPipeline {
    client: OpenWeatherClient,
    api_key: Option<String>,
    display: Arc<dyn DisplaySink>,
    locator: Arc<dyn Locator>,
}

impl FetchPipeline {
    pub fn new(
        client: OpenWeatherClient,
        api_key: Option<String>,
        display: Arc<dyn DisplaySink>,
        locator: Arc<dyn Locator>,
    ) -> Self {
        Self {
            client,
            api_key,
            display,
            locator,
        }
    }

    /// The search action: validates typed input, then looks the city up
    pub async fn search(&self, input: &str) -> DisplayState {
        let city = input.trim();
        if city.is_empty() {
            return self.fail(WeatherError::Validation(
                "Please enter a city name".to_string(),
            ));
        }
        self.fetch_weather(LocationQuery::City(city.to_string()))
            .await
    }

    /// The "use my location" action
    pub async fn locate(&self) -> DisplayState {
        match self.locator.locate().await {
            Ok(at) => self.fetch_weather(LocationQuery::Coordinates(at)).await,
            Err(e) => self.fail(e.into()),
        }
    }

    pub async fn fetch_weather(&self, query: LocationQuery) -> DisplayState {
        tracing::info!("Fetching weather for {:?}", query);

        let Some(api_key) = self.api_key.as_deref() else {
            return self.fail(WeatherError::MissingCredential);
        };

        self.display.show(&DisplayState::Loading);

        match self.run(&query, api_key).await {
            Ok((current, forecast)) => {
                tracing::info!(
                    "Weather for {}, {}: {} with {} forecast days",
                    current.place,
                    current.country,
                    current.condition,
                    forecast.len()
                );
                let state = DisplayState::Success { current, forecast };
                self.display.show(&state);
                state
            }
            Err(e) => self.fail(e),
        }
    }

    async fn run(
        &self,
        query: &LocationQuery,
        api_key: &str,
    ) -> Result<(CurrentConditions, Vec<ForecastDay>), WeatherError> {
        let response = self
            .client
            .current(query, api_key)
            .await
            .map_err(|e| match e {
                ApiError::Status(_) => WeatherError::NotFound(query.entity()),
                other => WeatherError::Request(other),
            })?;
        let current = CurrentConditions::from(response);

        // Name queries only become positions here, so the forecast always
        // uses the coordinates the API answered with.
        let forecast = match self.client.forecast(current.coordinates, api_key).await {
            Ok(response) => select_midday(&response),
            Err(e) => {
                tracing::warn!("{}", WeatherError::Forecast(e));
                Vec::new()
            }
        };

        Ok((current, forecast))
    }

    fn fail(&self, err: WeatherError) -> DisplayState {
        tracing::info!("Weather lookup failed: {}", err);
        let state = DisplayState::Error(err.user_message());
        self.display.show(&state);
        state
    }
}
