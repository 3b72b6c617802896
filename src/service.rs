use anyhow::Result;
use reqwest::Client;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::OpenWeatherClient;
use crate::config::Settings;
use crate::constants::USER_AGENT;
use crate::formatters::format_display;
use crate::locator::{IpLocator, Locator, NoLocator};
use crate::models::{Coordinates, CoordinatesRequest, LocationQuery, SearchCityRequest};
use crate::pipeline::FetchPipeline;
use crate::state::{DisplayState, Screen};

/// Weather widget exposed as an MCP server
#[derive(Clone)]
pub struct Weather {
    pipeline: Arc<FetchPipeline>,
    screen: Arc<Screen>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Arc::new(Client::builder().user_agent(USER_AGENT).build()?);

        let locator: Arc<dyn Locator> = if settings.geolocation {
            Arc::new(IpLocator::new(client.clone(), settings.locator_url.clone()))
        } else {
            Arc::new(NoLocator)
        };

        if settings.credential().is_none() {
            tracing::warn!("OPENWEATHER_API_KEY is not set; lookups will fail until it is");
        }

        let screen = Arc::new(Screen::new());
        let pipeline = FetchPipeline::new(
            OpenWeatherClient::new(client, settings.base_url.clone()),
            settings.credential().map(str::to_string),
            screen.clone(),
            locator,
        );

        Ok(Self {
            pipeline: Arc::new(pipeline),
            screen,
            tool_router: Self::tool_router(),
        })
    }

    /// Current display region contents
    pub fn display(&self) -> DisplayState {
        self.screen.current()
    }

    /// Error banners become error results; every other state is plain text
    fn to_tool_result(state: &DisplayState) -> CallToolResult {
        let text = format_display(state);
        match state {
            DisplayState::Error(_) => CallToolResult::error(vec![Content::text(text)]),
            _ => CallToolResult::success(vec![Content::text(text)]),
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-widget".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather lookup widget powered by the OpenWeatherMap API. \
                Search a city or use your location to see current conditions and a 5-day forecast."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Looks up current weather and forecast by city name
    #[tool(description = "Get current weather and a 5-day forecast for a city. Provide the city name as typed (e.g., 'London', or 'Paris,FR' to disambiguate by country code).")]
    async fn search_city(
        &self,
        Parameters(request): Parameters<SearchCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Search for city: {:?}", request.city);

        let state = self.pipeline.search(&request.city).await;
        Ok(Self::to_tool_result(&state))
    }

    /// Looks up current weather and forecast by coordinates
    #[tool(description = "Get current weather and a 5-day forecast for a position. Provide latitude and longitude (e.g., latitude: 51.5085, longitude: -0.1257 for London).")]
    async fn weather_at(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Weather at coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let query = LocationQuery::Coordinates(Coordinates {
            latitude: request.latitude,
            longitude: request.longitude,
        });
        let state = self.pipeline.fetch_weather(query).await;
        Ok(Self::to_tool_result(&state))
    }

    /// Looks up weather at the host's own position
    #[tool(description = "Get current weather and a 5-day forecast for your current location, resolved from this machine's network address.")]
    async fn locate_me(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Locating host");

        let state = self.pipeline.locate().await;
        Ok(Self::to_tool_result(&state))
    }

    /// Shows the display region as it currently stands
    #[tool(description = "Show the weather display: the last lookup result, an error message, or a hint when nothing has been looked up yet.")]
    async fn show_display(&self) -> Result<CallToolResult, McpError> {
        Ok(Self::to_tool_result(&self.screen.current()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_service_starts_idle() {
        let weather = Weather::new(&Settings::default()).unwrap();
        assert_eq!(weather.display(), DisplayState::Idle);
    }

    #[test]
    fn error_states_become_error_results() {
        let result = Weather::to_tool_result(&DisplayState::Error("City not found".into()));
        assert_eq!(result.is_error, Some(true));

        let result = Weather::to_tool_result(&DisplayState::Idle);
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn server_info_names_the_widget() {
        let weather = Weather::new(&Settings::default()).unwrap();
        let info = weather.get_info();
        assert_eq!(info.server_info.name, "weather-widget");
        assert!(info.capabilities.tools.is_some());
    }
}
