//! Wire types for the availability API and the geocoding provider.

use serde::Deserialize;
use shelters_core::{ShelterRecord, ShelterSnapshot};

/// Envelope form of the `/api/shelters` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEnvelope {
    pub shelter_availabilities: Vec<ShelterRecord>,
    #[serde(default)]
    pub update_date: Option<String>,
}

/// Decodes either response shape served by `/api/shelters`: a bare array of
/// records, or an [`AvailabilityEnvelope`].
///
/// # Errors
///
/// Returns the underlying `serde_json` error when the body matches neither.
pub fn decode_availability(body: serde_json::Value) -> Result<ShelterSnapshot, serde_json::Error> {
    if body.is_array() {
        let records: Vec<ShelterRecord> = serde_json::from_value(body)?;
        return Ok(ShelterSnapshot {
            records,
            update_date: None,
        });
    }

    let envelope: AvailabilityEnvelope = serde_json::from_value(body)?;
    Ok(ShelterSnapshot {
        records: envelope.shelter_availabilities,
        update_date: envelope.update_date,
    })
}

// ---------------------------------------------------------------------------
// Geocoding
// ---------------------------------------------------------------------------

/// Top-level geocoder response: `{ "status": "OK", "results": [...] }`.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Only the fields the view consumes; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
