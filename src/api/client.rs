use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{InfoResponse, RouteResponse};
use crate::resolver::{FlightSummary, Waypoint};

pub const DEFAULT_INFO_URL: &str = "https://santa-api.appspot.com/info?client=web&language=en&fingerprint=&routeOffset=0&streamOffset=0";

/// Upstream the flight data is polled from.
#[allow(async_fn_in_trait)]
pub trait FlightSource {
    async fn summary(&self) -> Result<FlightSummary, ApiError>;
    async fn waypoints(&self, route_ref: &str) -> Result<Vec<Waypoint>, ApiError>;
}

pub struct SantaApi {
    client: Client,
    info_url: String,
}

impl SantaApi {
    pub fn new(info_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            info_url: info_url.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.bytes().await?;
        log::trace!("{} returned {} bytes", url, body.len());
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl FlightSource for SantaApi {
    async fn summary(&self) -> Result<FlightSummary, ApiError> {
        let info: InfoResponse = self.get_json(&self.info_url).await?;
        FlightSummary::try_from(info)
    }

    async fn waypoints(&self, route_ref: &str) -> Result<Vec<Waypoint>, ApiError> {
        let route: RouteResponse = self.get_json(route_ref).await?;
        route.into_waypoints()
    }
}
