//! Client-side shaping of loaded shelter records: filter, annotate, sort.
//!
//! [`derive_rows`] is a pure function of its inputs. Loaded records are
//! borrowed, never mutated; distances live on the derived [`ShelterRow`]s so a
//! new reference location simply produces a new row list.

mod filter;
mod sort;
mod state;

use serde::Serialize;

use crate::geo::{distance_from, GeoPoint};
use crate::shelter::ShelterRecord;

pub use filter::{distinct_values, FilterDimension, FilterOptions, FilterState};
pub use sort::{
    compare_distance, locale_cmp, SortColumn, SortDirection, SortState, UnknownSortColumn,
};
pub use state::{
    AddressResolution, AvailabilityView, LoadFailure, LoadState, LoadTicket, ReferenceLocation,
    ResolveRejected, ResolveTicket, UNKNOWN_ERROR_MESSAGE,
};

/// A visible row: a borrowed record plus its derived annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterRow<'a> {
    #[serde(flatten)]
    pub record: &'a ShelterRecord,
    /// Kilometres from the reference location; `None` without one, or when
    /// the shelter has no usable coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
}

/// Derives the ordered, visible rows from loaded records.
///
/// With a `reference`, rows are ordered by distance in `sort.direction` and
/// rows without coordinates rank as if infinitely far away. Without one, rows
/// are ordered by `sort.column`. The sort is stable, so ties keep load order.
#[must_use]
pub fn derive_rows<'a>(
    records: &'a [ShelterRecord],
    filters: &FilterState,
    sort: SortState,
    reference: Option<GeoPoint>,
) -> Vec<ShelterRow<'a>> {
    let mut rows: Vec<ShelterRow<'a>> = records
        .iter()
        .filter(|r| filters.matches(r))
        .map(|record| ShelterRow {
            record,
            distance_km: reference.and_then(|origin| distance_from(origin, record.location())),
            map_link: None,
        })
        .collect();

    if reference.is_some() {
        rows.sort_by(|a, b| {
            sort.direction
                .apply(compare_distance(a.distance_km, b.distance_km))
        });
    } else {
        rows.sort_by(|a, b| sort.direction.apply(sort.column.compare(a.record, b.record)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelter(name: &str, service: &str, beds: u32, at: Option<(f64, f64)>) -> ShelterRecord {
        ShelterRecord {
            name: name.to_string(),
            address: format!("{name} Street"),
            postal_code: String::new(),
            service_type: service.to_string(),
            capacity_type: "Bed Based Capacity".to_string(),
            sector: "Mixed Adult".to_string(),
            available_beds: beds,
            total_beds: beds * 2,
            available_rooms: 0,
            total_rooms: 0,
            lat: at.map(|(lat, _)| lat),
            lng: at.map(|(_, lng)| lng),
        }
    }

    fn names(rows: &[ShelterRow<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.record.name.clone()).collect()
    }

    // B sits ~10 km due north of A (0.0899 degrees of latitude).
    fn pair() -> Vec<ShelterRecord> {
        vec![
            shelter("A", "X", 5, Some((43.6500, -79.3800))),
            shelter("B", "Y", 2, Some((43.7399, -79.3800))),
        ]
    }

    #[test]
    fn filter_by_service_type_keeps_matching_rows() {
        let records = pair();
        let mut filters = FilterState::default();
        filters.set(FilterDimension::ServiceType, Some("X".to_string()));
        let rows = derive_rows(&records, &filters, SortState::default(), None);
        assert_eq!(names(&rows), vec!["A"]);
    }

    #[test]
    fn sort_by_available_beds_ascending() {
        let records = pair();
        let sort = SortState::new(SortColumn::AvailableBeds, SortDirection::Ascending);
        let rows = derive_rows(&records, &FilterState::default(), sort, None);
        assert_eq!(names(&rows), vec!["B", "A"]);
    }

    #[test]
    fn reference_at_a_ranks_a_first_with_zero_distance() {
        let records = pair();
        let origin = records[0].location();
        let rows = derive_rows(&records, &FilterState::default(), SortState::default(), origin);

        assert_eq!(names(&rows), vec!["A", "B"]);
        assert!(rows[0].distance_km.unwrap() < 1e-9);
        let b = rows[1].distance_km.unwrap();
        assert!((b - 10.0).abs() < 0.05, "expected ~10 km, got {b}");
    }

    #[test]
    fn reference_overrides_selected_column() {
        let records = pair();
        let sort = SortState::new(SortColumn::AvailableBeds, SortDirection::Ascending);
        let rows = derive_rows(&records, &FilterState::default(), sort, records[0].location());
        assert_eq!(names(&rows), vec!["A", "B"]);
    }

    #[test]
    fn reversing_direction_reverses_distinct_values() {
        let records = vec![
            shelter("Delta", "X", 9, None),
            shelter("alpha", "X", 1, None),
            shelter("Charlie", "X", 4, None),
            shelter("bravo", "X", 7, None),
        ];
        for column in [SortColumn::Name, SortColumn::AvailableBeds, SortColumn::TotalBeds] {
            let asc = derive_rows(
                &records,
                &FilterState::default(),
                SortState::new(column, SortDirection::Ascending),
                None,
            );
            let desc = derive_rows(
                &records,
                &FilterState::default(),
                SortState::new(column, SortDirection::Descending),
                None,
            );
            let mut reversed = names(&desc);
            reversed.reverse();
            assert_eq!(names(&asc), reversed, "column {column}");
        }
    }

    #[test]
    fn missing_coordinates_rank_after_every_located_row() {
        let records = vec![
            shelter("Nowhere", "X", 1, None),
            shelter("Far", "X", 1, Some((45.4215, -75.6972))),
            shelter("Near", "X", 1, Some((43.6510, -79.3810))),
            shelter("Broken", "X", 1, Some((123.0, -79.0))),
        ];
        let origin = GeoPoint::new(43.6500, -79.3800);
        let rows = derive_rows(&records, &FilterState::default(), SortState::default(), origin);

        assert_eq!(&names(&rows)[..2], ["Near", "Far"]);
        assert!(rows[2..].iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn descending_distance_puts_farthest_located_rows_after_unknowns() {
        let records = vec![
            shelter("Near", "X", 1, Some((43.6510, -79.3810))),
            shelter("Nowhere", "X", 1, None),
            shelter("Far", "X", 1, Some((45.4215, -75.6972))),
        ];
        let origin = GeoPoint::new(43.6500, -79.3800);
        let sort = SortState::new(SortColumn::Name, SortDirection::Descending);
        let rows = derive_rows(&records, &FilterState::default(), sort, origin);
        assert_eq!(names(&rows), vec!["Nowhere", "Far", "Near"]);
    }

    #[test]
    fn visible_rows_never_exceed_loaded_rows() {
        let records = pair();
        let rows = derive_rows(&records, &FilterState::default(), SortState::default(), None);
        assert_eq!(rows.len(), records.len());
        assert!(rows.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn ties_keep_load_order() {
        let records = vec![
            shelter("First", "X", 3, None),
            shelter("Second", "X", 3, None),
        ];
        let sort = SortState::new(SortColumn::AvailableBeds, SortDirection::Ascending);
        let rows = derive_rows(&records, &FilterState::default(), sort, None);
        assert_eq!(names(&rows), vec!["First", "Second"]);
    }

    // 24 rows with mixed case names, repeated counts, and a third of them
    // without coordinates.
    fn mixed_rows() -> Vec<ShelterRecord> {
        let words = ["delta", "Alpha", "charlie", "Bravo", "echo", "alpha"];
        (0..24u32)
            .map(|i| {
                let word = words[(i as usize * 5) % words.len()];
                let at = (i % 3 != 0).then(|| (43.0 + f64::from((i * 7) % 13) / 10.0, -79.4));
                let mut record = shelter(&format!("{word} {}", i % 4), "X", (i * 11) % 7, at);
                record.total_rooms = (i * 5) % 9;
                record.sector = words[(i as usize) % words.len()].to_uppercase();
                record
            })
            .collect()
    }

    #[test]
    fn every_column_orders_mixed_rows_in_both_directions() {
        let records = mixed_rows();
        for column in SortColumn::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let sort = SortState::new(column, direction);
                let rows = derive_rows(&records, &FilterState::default(), sort, None);
                assert_eq!(rows.len(), records.len());
                for pair in rows.windows(2) {
                    let ordering = direction.apply(column.compare(pair[0].record, pair[1].record));
                    assert_ne!(
                        ordering,
                        std::cmp::Ordering::Greater,
                        "{column} {direction:?}: {} before {}",
                        pair[0].record.name,
                        pair[1].record.name
                    );
                }
            }
        }
    }

    #[test]
    fn distance_ranking_orders_mixed_rows() {
        let records = mixed_rows();
        let origin = GeoPoint::new(43.0, -79.4);
        let rows = derive_rows(&records, &FilterState::default(), SortState::default(), origin);

        let located = rows.iter().take_while(|r| r.distance_km.is_some()).count();
        assert_eq!(located, 16);
        assert!(rows[located..].iter().all(|r| r.distance_km.is_none()));
        for pair in rows[..located].windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn row_serializes_flat_with_distance() {
        let records = pair();
        let rows = derive_rows(
            &records,
            &FilterState::default(),
            SortState::default(),
            records[0].location(),
        );
        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["name"], "A");
        assert_eq!(value["serviceType"], "X");
        assert!(value["distanceKm"].is_number());
        assert!(value.get("mapLink").is_none());
    }
}
