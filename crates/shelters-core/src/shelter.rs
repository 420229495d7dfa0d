//! Shelter availability records as served by `/api/shelters`.
//!
//! Decoding is lenient the same way the upstream feed is: counts that arrive
//! as `null` or negative become `0`, and text fields that arrive as `null`
//! become empty strings. Coordinates stay optional; out-of-range values are
//! kept as received but never produce a [`GeoPoint`].

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::GeoPoint;

/// One row of shelter capacity and location data.
///
/// Identity is positional: two records may carry identical fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterRecord {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub service_type: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub capacity_type: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub sector: String,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub available_beds: u32,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub total_beds: u32,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub available_rooms: u32,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub total_rooms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl ShelterRecord {
    /// The shelter's position, if both coordinates are present and in range.
    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.lat?, self.lng?)
    }

    /// `true` when coordinates were supplied but at least one is unusable.
    #[must_use]
    pub fn has_invalid_coordinates(&self) -> bool {
        (self.lat.is_some() || self.lng.is_some()) && self.location().is_none()
    }
}

/// A fully decoded response from the availability endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShelterSnapshot {
    pub records: Vec<ShelterRecord>,
    /// Raw `updateDate` from the envelope form of the response.
    pub update_date: Option<String>,
}

impl ShelterSnapshot {
    /// Parses `update_date` as either `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[must_use]
    pub fn update_day(&self) -> Option<NaiveDate> {
        self.update_date.as_deref().and_then(parse_update_date)
    }
}

/// Parses an `updateDate` value into a calendar day.
///
/// Returns `None` for anything that is neither `YYYY-MM-DD` nor RFC 3339.
#[must_use]
pub fn parse_update_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Counts may arrive as floats ("12.0") from spreadsheet-backed feeds.
fn count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if !raw.is_finite() || raw <= 0.0 {
        return Ok(0);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = raw.min(f64::from(u32::MAX)) as u32;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(value: serde_json::Value) -> ShelterRecord {
        serde_json::from_value(value).expect("record should decode")
    }

    #[test]
    fn decodes_camel_case_fields() {
        let record = decode(serde_json::json!({
            "name": "Seaton House",
            "address": "339 George St",
            "postalCode": "m5a 2n2",
            "serviceType": "Shelter",
            "capacityType": "Bed Based Capacity",
            "sector": "Men",
            "availableBeds": 4,
            "totalBeds": 120,
            "availableRooms": 0,
            "totalRooms": 0,
            "lat": 43.659,
            "lng": -79.372
        }));

        assert_eq!(record.name, "Seaton House");
        assert_eq!(record.postal_code, "m5a 2n2");
        assert_eq!(record.capacity_type, "Bed Based Capacity");
        assert_eq!(record.available_beds, 4);
        assert_eq!(record.total_beds, 120);
        let location = record.location().expect("coordinates are valid");
        assert!((location.lat - 43.659).abs() < 1e-9);
    }

    #[test]
    fn null_and_missing_counts_become_zero() {
        let record = decode(serde_json::json!({
            "name": "Annex",
            "availableBeds": null,
            "totalRooms": -3
        }));
        assert_eq!(record.available_beds, 0);
        assert_eq!(record.total_beds, 0);
        assert_eq!(record.total_rooms, 0);
    }

    #[test]
    fn fractional_counts_truncate() {
        let record = decode(serde_json::json!({ "availableBeds": 7.0, "totalBeds": 9.8 }));
        assert_eq!(record.available_beds, 7);
        assert_eq!(record.total_beds, 9);
    }

    #[test]
    fn null_text_fields_become_empty() {
        let record = decode(serde_json::json!({ "name": "X", "postalCode": null }));
        assert_eq!(record.postal_code, "");
        assert_eq!(record.sector, "");
    }

    #[test]
    fn out_of_range_latitude_has_no_location() {
        let record = decode(serde_json::json!({ "lat": 123.0, "lng": -79.0 }));
        assert!(record.location().is_none());
        assert!(record.has_invalid_coordinates());
    }

    #[test]
    fn missing_longitude_is_not_flagged_invalid_when_both_absent() {
        let record = decode(serde_json::json!({ "name": "X" }));
        assert!(record.location().is_none());
        assert!(!record.has_invalid_coordinates());
    }

    #[test]
    fn serializes_without_absent_coordinates() {
        let record = decode(serde_json::json!({ "name": "X" }));
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("lat").is_none());
        assert_eq!(value["availableBeds"], 0);
    }

    #[test]
    fn update_day_accepts_plain_dates() {
        let snapshot = ShelterSnapshot {
            records: vec![],
            update_date: Some("2024-11-20".to_string()),
        };
        assert_eq!(
            snapshot.update_day(),
            NaiveDate::from_ymd_opt(2024, 11, 20)
        );
    }

    #[test]
    fn update_day_accepts_rfc3339() {
        assert_eq!(
            parse_update_date("2024-11-20T08:15:00Z"),
            NaiveDate::from_ymd_opt(2024, 11, 20)
        );
    }

    #[test]
    fn update_day_rejects_garbage() {
        assert!(parse_update_date("yesterday").is_none());
    }
}
