use std::collections::HashSet;

use serde::Serialize;

use crate::shelter::ShelterRecord;

/// One of the three independently filterable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    ServiceType,
    CapacityType,
    Sector,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::ServiceType,
        FilterDimension::CapacityType,
        FilterDimension::Sector,
    ];

    /// The record's value for this dimension.
    #[must_use]
    pub fn value_of(self, record: &ShelterRecord) -> &str {
        match self {
            FilterDimension::ServiceType => &record.service_type,
            FilterDimension::CapacityType => &record.capacity_type,
            FilterDimension::Sector => &record.sector,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::ServiceType => "Service Type",
            FilterDimension::CapacityType => "Capacity Type",
            FilterDimension::Sector => "Sector",
        }
    }
}

impl std::fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Active equality predicates, combined with logical AND.
///
/// `None` and `Some("")` both mean "match all" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub service_type: Option<String>,
    pub capacity_type: Option<String>,
    pub sector: Option<String>,
}

impl FilterState {
    #[must_use]
    pub fn selection(&self, dimension: FilterDimension) -> Option<&str> {
        let slot = match dimension {
            FilterDimension::ServiceType => &self.service_type,
            FilterDimension::CapacityType => &self.capacity_type,
            FilterDimension::Sector => &self.sector,
        };
        slot.as_deref().filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, dimension: FilterDimension, value: Option<String>) {
        let value = value.filter(|s| !s.is_empty());
        match dimension {
            FilterDimension::ServiceType => self.service_type = value,
            FilterDimension::CapacityType => self.capacity_type = value,
            FilterDimension::Sector => self.sector = value,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|d| self.selection(*d).is_none())
    }

    /// Case-sensitive exact match on every active dimension.
    #[must_use]
    pub fn matches(&self, record: &ShelterRecord) -> bool {
        FilterDimension::ALL.iter().all(|d| {
            self.selection(*d)
                .is_none_or(|wanted| d.value_of(record) == wanted)
        })
    }
}

/// Distinct values per dimension, used to populate selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub service_types: Vec<String>,
    pub capacity_types: Vec<String>,
    pub sectors: Vec<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_records(records: &[ShelterRecord]) -> Self {
        Self {
            service_types: distinct_values(records, FilterDimension::ServiceType),
            capacity_types: distinct_values(records, FilterDimension::CapacityType),
            sectors: distinct_values(records, FilterDimension::Sector),
        }
    }

    #[must_use]
    pub fn for_dimension(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::ServiceType => &self.service_types,
            FilterDimension::CapacityType => &self.capacity_types,
            FilterDimension::Sector => &self.sectors,
        }
    }
}

/// Distinct values of `dimension` across `records`, in first-seen order.
#[must_use]
pub fn distinct_values(records: &[ShelterRecord], dimension: FilterDimension) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| dimension.value_of(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, service: &str, capacity: &str, sector: &str) -> ShelterRecord {
        ShelterRecord {
            name: name.to_string(),
            address: String::new(),
            postal_code: String::new(),
            service_type: service.to_string(),
            capacity_type: capacity.to_string(),
            sector: sector.to_string(),
            available_beds: 0,
            total_beds: 0,
            available_rooms: 0,
            total_rooms: 0,
            lat: None,
            lng: None,
        }
    }

    fn sample() -> Vec<ShelterRecord> {
        vec![
            record("A", "Shelter", "Bed Based Capacity", "Men"),
            record("B", "Motel/Hotel Shelter", "Room Based Capacity", "Families"),
            record("C", "Shelter", "Room Based Capacity", "Women"),
            record("D", "24-Hour Respite Site", "Bed Based Capacity", "Mixed Adult"),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filters = FilterState::default();
        assert!(filters.is_empty());
        assert!(sample().iter().all(|r| filters.matches(r)));
    }

    #[test]
    fn empty_string_selection_means_match_all() {
        let mut filters = FilterState::default();
        filters.set(FilterDimension::Sector, Some(String::new()));
        assert!(filters.is_empty());
        assert_eq!(filters.sector, None);
    }

    #[test]
    fn service_type_filter_partitions_the_set() {
        let records = sample();
        let mut filters = FilterState::default();
        filters.set(FilterDimension::ServiceType, Some("Shelter".to_string()));

        let (kept, dropped): (Vec<_>, Vec<_>) = records.iter().partition(|r| filters.matches(r));
        assert!(kept.iter().all(|r| r.service_type == "Shelter"));
        assert!(dropped.iter().all(|r| r.service_type != "Shelter"));
        assert_eq!(kept.len() + dropped.len(), records.len());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let mut filters = FilterState::default();
        filters.set(FilterDimension::ServiceType, Some("Shelter".to_string()));
        filters.set(
            FilterDimension::CapacityType,
            Some("Room Based Capacity".to_string()),
        );
        let names: Vec<_> = sample()
            .into_iter()
            .filter(|r| filters.matches(r))
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["C"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut filters = FilterState::default();
        filters.set(FilterDimension::Sector, Some("men".to_string()));
        assert!(!sample().iter().any(|r| filters.matches(r)));
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let values = distinct_values(&sample(), FilterDimension::CapacityType);
        assert_eq!(values, vec!["Bed Based Capacity", "Room Based Capacity"]);
    }

    #[test]
    fn options_for_empty_records_are_empty() {
        let options = FilterOptions::from_records(&[]);
        assert_eq!(options, FilterOptions::default());
    }

    #[test]
    fn options_cover_every_dimension() {
        let options = FilterOptions::from_records(&sample());
        assert_eq!(options.service_types.len(), 3);
        assert_eq!(options.for_dimension(FilterDimension::Sector).len(), 4);
    }
}
