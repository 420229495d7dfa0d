//! HTTP client for the shelter availability API.
//!
//! One read-only endpoint, `GET {base_url}/api/shelters`, with no query
//! parameters and no authentication. Failures are never retried: the view
//! surfaces them as a blocking error instead.

use std::time::Duration;

use reqwest::{Client, Url};
use shelters_core::{AppConfig, ShelterSnapshot};

use crate::error::ClientError;
use crate::types::decode_availability;

const SHELTERS_PATH: &str = "api/shelters";

/// Client for the availability API.
///
/// Use [`AvailabilityClient::from_config`] in the binary or
/// [`AvailabilityClient::new`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    client: Client,
    endpoint: Url,
}

impl AvailabilityClient {
    /// Creates a client for the API hosted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: Self::endpoint_url(base_url)?,
        })
    }

    /// # Errors
    ///
    /// See [`AvailabilityClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches and decodes the current shelter availability.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not one of the two
    ///   accepted response shapes.
    pub async fn fetch_shelters(&self) -> Result<ShelterSnapshot, ClientError> {
        let url = self.endpoint.to_string();
        tracing::debug!(%url, "fetching shelter availability");

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.clone(),
                source: e,
            })?;
        let snapshot = decode_availability(value).map_err(|e| ClientError::Deserialize {
            context: format!("shelter availability from {url}"),
            source: e,
        })?;

        let invalid = snapshot
            .records
            .iter()
            .filter(|r| r.has_invalid_coordinates())
            .count();
        if invalid > 0 {
            tracing::warn!(
                invalid,
                "records with out-of-range coordinates will rank as unlocated"
            );
        }
        tracing::debug!(records = snapshot.records.len(), "decoded shelter availability");

        Ok(snapshot)
    }

    /// Joins [`SHELTERS_PATH`] onto `base_url`, keeping any path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    fn endpoint_url(base_url: &str) -> Result<Url, ClientError> {
        // Normalise to exactly one trailing slash so `join` appends rather
        // than replacing the last path segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        base.join(SHELTERS_PATH)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
