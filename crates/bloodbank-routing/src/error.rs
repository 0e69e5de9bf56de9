use thiserror::Error;

/// Errors returned by the routing client.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No API key is configured; no request was sent.
    #[error("Graphhopper API key not configured")]
    MissingApiKey,

    /// The routing API answered with a non-2xx status.
    #[error("Routing API error: HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("Routing API error: {0}")]
    Http(#[from] reqwest::Error),

    /// The routing API answered 2xx with a body that is not JSON.
    #[error("Routing API returned invalid JSON: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("invalid routing base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl RoutingError {
    /// True for the configuration failure, false for anything the upstream
    /// service (or the path to it) caused.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::InvalidBaseUrl { .. })
    }
}
