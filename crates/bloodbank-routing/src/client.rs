//! HTTP client for the GraphHopper routing API.
//!
//! The response body is checked to be JSON and handed back byte-for-byte as a
//! [`RawValue`]; callers pass it straight through to their own clients.

use std::time::Duration;

use bloodbank_core::Location;
use reqwest::{Client, Url};
use serde_json::value::RawValue;

use crate::error::RoutingError;

const VEHICLE: &str = "car";

/// Client for the routing API.
///
/// The endpoint comes from configuration, so the same client talks to the
/// public API, a self-hosted instance, or a mock server.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl RoutingClient {
    /// Creates a client with a custom route endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`RoutingError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<String>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("bloodbank/0.1 (route-proxy)")
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| RoutingError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url,
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Requests a driving route from `start` to `end`.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::MissingApiKey`] when no key is configured. Nothing is
    ///   sent in that case.
    /// - [`RoutingError::Upstream`] on a non-2xx response.
    /// - [`RoutingError::Http`] on network failure or timeout.
    /// - [`RoutingError::Deserialize`] if a 2xx body is not JSON.
    pub async fn route(
        &self,
        start: Location,
        end: Location,
    ) -> Result<Box<RawValue>, RoutingError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("routing requested but no Graphhopper API key is configured");
            return Err(RoutingError::MissingApiKey);
        };

        let url = self.build_url(api_key, start, end);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "routing API returned an error");
            return Err(RoutingError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        RawValue::from_string(body).map_err(RoutingError::Deserialize)
    }

    /// Builds the request URL with both points, the fixed vehicle profile,
    /// and unencoded point geometry.
    fn build_url(&self, api_key: &str, start: Location, end: Location) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("point", &format_point(start));
            pairs.append_pair("point", &format_point(end));
            pairs.append_pair("vehicle", VEHICLE);
            pairs.append_pair("key", api_key);
            pairs.append_pair("points_encoded", "false");
        }
        url
    }
}

fn format_point(location: Location) -> String {
    format!("{},{}", location.latitude, location.longitude)
}
