use shelters_core::LoadFailure;
use thiserror::Error;

/// Errors returned by [`AvailabilityClient`](crate::AvailabilityClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<ClientError> for LoadFailure {
    fn from(err: ClientError) -> Self {
        LoadFailure::from_description(&err.to_string())
    }
}

/// Errors returned by [`PlaceResolver`](crate::PlaceResolver).
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from geocoder")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered but reported a non-`OK` status.
    #[error("geocoder returned {status}: {message}")]
    Provider { status: String, message: String },

    #[error("no results for \"{query}\"")]
    NoResults { query: String },

    /// The first result carried coordinates outside the valid range.
    #[error("geocoder returned invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("no maps API key configured; set SHELTERS_MAPS_API_KEY")]
    MissingApiKey,

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
