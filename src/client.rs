use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;

use crate::constants::UNITS;
use crate::errors::ApiError;
use crate::models::{Coordinates, CurrentWeatherResponse, ForecastResponse, LocationQuery};

/// Thin client for the OpenWeatherMap current-weather and forecast endpoints
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Current conditions for a city name or a position
    pub async fn current(
        &self,
        query: &LocationQuery,
        api_key: &str,
    ) -> Result<CurrentWeatherResponse, ApiError> {
        let params = match query {
            LocationQuery::City(city) => vec![("q", city.clone())],
            LocationQuery::Coordinates(at) => coordinate_params(*at),
        };
        self.make_request("weather", params, api_key).await
    }

    /// 5 day / 3 hour forecast for a position
    pub async fn forecast(
        &self,
        at: Coordinates,
        api_key: &str,
    ) -> Result<ForecastResponse, ApiError> {
        self.make_request("forecast", coordinate_params(at), api_key)
            .await
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
        api_key: &str,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} {:?}", url, params);

        params.push(("units", UNITS.to_string()));
        params.push(("appid", api_key.to_string()));

        let response = self.client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}

fn coordinate_params(at: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("lat", at.latitude.to_string()),
        ("lon", at.longitude.to_string()),
    ]
}
