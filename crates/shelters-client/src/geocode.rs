//! Resolves free-text addresses to a [`ReferenceLocation`].
//!
//! Speaks the Google Geocoding JSON format and consumes only
//! `formatted_address` and `geometry.location.{lat,lng}` of the first result.
//! The API key is always injected from configuration.

use std::time::Duration;

use reqwest::{Client, Url};
use shelters_core::{AppConfig, GeoPoint, ReferenceLocation};

use crate::error::GeocodeError;
use crate::types::GeocodeResponse;

/// Client for the place-resolution provider.
#[derive(Debug, Clone)]
pub struct PlaceResolver {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl PlaceResolver {
    /// # Errors
    ///
    /// Returns [`GeocodeError::MissingApiKey`] for a blank key,
    /// [`GeocodeError::InvalidBaseUrl`] for an unparseable endpoint, or
    /// [`GeocodeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        if api_key.trim().is_empty() {
            return Err(GeocodeError::MissingApiKey);
        }
        let base_url = Url::parse(base_url.trim()).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    /// # Errors
    ///
    /// Returns [`GeocodeError::MissingApiKey`] when no key is configured; see
    /// [`PlaceResolver::new`] for the rest.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        let api_key = config
            .maps_api_key
            .as_deref()
            .ok_or(GeocodeError::MissingApiKey)?;
        Self::new(
            &config.geocoder_base_url,
            api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Resolves `query` to the provider's best match.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] / [`GeocodeError::UnexpectedStatus`] on transport failure.
    /// - [`GeocodeError::Deserialize`] if the body is not a geocoder response.
    /// - [`GeocodeError::NoResults`] for `ZERO_RESULTS` or an empty result list.
    /// - [`GeocodeError::Provider`] for any other non-`OK` status.
    /// - [`GeocodeError::InvalidCoordinates`] if the match is out of range.
    pub async fn resolve(&self, query: &str) -> Result<ReferenceLocation, GeocodeError> {
        let url = self.build_url(query);
        tracing::debug!(%query, "resolving address");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("geocode(query={query})"),
                source: e,
            })?;

        Self::first_location(query, parsed)
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", &self.api_key);
        url
    }

    fn first_location(
        query: &str,
        response: GeocodeResponse,
    ) -> Result<ReferenceLocation, GeocodeError> {
        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                return Err(GeocodeError::NoResults {
                    query: query.to_owned(),
                })
            }
            _ => {
                let message = response
                    .error_message
                    .unwrap_or_else(|| "no details provided".to_string());
                return Err(GeocodeError::Provider {
                    status: response.status,
                    message,
                });
            }
        }

        let first = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResults {
                query: query.to_owned(),
            })?;
        let location = first.geometry.location;
        let point =
            GeoPoint::new(location.lat, location.lng).ok_or(GeocodeError::InvalidCoordinates {
                lat: location.lat,
                lng: location.lng,
            })?;

        Ok(ReferenceLocation {
            formatted_address: first.formatted_address,
            point,
        })
    }
}
