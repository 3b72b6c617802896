use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::errors::LocationError;
use crate::models::{Coordinates, IpLocationResponse};

/// Source of the "use my location" position
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Resolves the host's approximate position from its public IP address
pub struct IpLocator {
    client: Arc<Client>,
    url: String,
}

impl IpLocator {
    pub fn new(client: Arc<Client>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LocationError::PermissionDenied)
            }
            status if !status.is_success() => {
                return Err(LocationError::Unavailable(format!(
                    "location lookup failed with status: {}",
                    status
                )))
            }
            _ => {}
        }

        let data = response
            .json::<IpLocationResponse>()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let coordinates = data.coordinates().ok_or_else(|| {
            LocationError::Unavailable(format!("unexpected location format: {:?}", data.loc))
        })?;
        tracing::debug!(
            "Located host near {} at {}, {}",
            data.city,
            coordinates.latitude,
            coordinates.longitude
        );
        Ok(coordinates)
    }
}

/// Used when the location service is switched off
pub struct NoLocator;

#[async_trait]
impl Locator for NoLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}
