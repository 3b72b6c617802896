//! Weather lookup widget served over the Model Context Protocol.
//!
//! A lookup resolves a city name or position to current conditions via the
//! OpenWeatherMap API, follows up with a forecast for the returned
//! coordinates, and renders the result into a single display state.

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod forecast;
pub mod formatters;
pub mod locator;
pub mod models;
pub mod pipeline;
pub mod service;
pub mod state;

pub use config::Settings;
pub use errors::{ApiError, LocationError, WeatherError};
pub use models::{Coordinates, CurrentConditions, ForecastDay, LocationQuery};
pub use pipeline::FetchPipeline;
pub use service::Weather;
pub use state::{DisplaySink, DisplayState, Screen};
