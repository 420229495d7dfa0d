use std::cmp::Ordering;
use std::str::FromStr;

use crate::shelter::ShelterRecord;

/// A sortable column of the availability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortColumn {
    #[default]
    Name,
    Address,
    PostalCode,
    ServiceType,
    CapacityType,
    Sector,
    AvailableBeds,
    TotalBeds,
    AvailableRooms,
    TotalRooms,
}

impl SortColumn {
    pub const ALL: [SortColumn; 10] = [
        SortColumn::Name,
        SortColumn::Address,
        SortColumn::PostalCode,
        SortColumn::ServiceType,
        SortColumn::CapacityType,
        SortColumn::Sector,
        SortColumn::AvailableBeds,
        SortColumn::TotalBeds,
        SortColumn::AvailableRooms,
        SortColumn::TotalRooms,
    ];

    /// Kebab-case identifier accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Address => "address",
            SortColumn::PostalCode => "postal-code",
            SortColumn::ServiceType => "service-type",
            SortColumn::CapacityType => "capacity-type",
            SortColumn::Sector => "sector",
            SortColumn::AvailableBeds => "available-beds",
            SortColumn::TotalBeds => "total-beds",
            SortColumn::AvailableRooms => "available-rooms",
            SortColumn::TotalRooms => "total-rooms",
        }
    }

    fn text_of(self, record: &ShelterRecord) -> Option<&str> {
        match self {
            SortColumn::Name => Some(&record.name),
            SortColumn::Address => Some(&record.address),
            SortColumn::PostalCode => Some(&record.postal_code),
            SortColumn::ServiceType => Some(&record.service_type),
            SortColumn::CapacityType => Some(&record.capacity_type),
            SortColumn::Sector => Some(&record.sector),
            SortColumn::AvailableBeds
            | SortColumn::TotalBeds
            | SortColumn::AvailableRooms
            | SortColumn::TotalRooms => None,
        }
    }

    fn count_of(self, record: &ShelterRecord) -> u32 {
        match self {
            SortColumn::AvailableBeds => record.available_beds,
            SortColumn::TotalBeds => record.total_beds,
            SortColumn::AvailableRooms => record.available_rooms,
            SortColumn::TotalRooms => record.total_rooms,
            _ => 0,
        }
    }

    /// Ascending comparison of two records on this column.
    ///
    /// Text columns use [`locale_cmp`], count columns compare arithmetically.
    /// Every column is a total order over records.
    #[must_use]
    pub fn compare(self, a: &ShelterRecord, b: &ShelterRecord) -> Ordering {
        match (self.text_of(a), self.text_of(b)) {
            (Some(x), Some(y)) => locale_cmp(x, y),
            _ => self.count_of(a).cmp(&self.count_of(b)),
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sort column '{0}'")]
pub struct UnknownSortColumn(pub String);

impl FromStr for SortColumn {
    type Err = UnknownSortColumn;

    /// Accepts kebab-case (`available-beds`), snake case, and the wire's camelCase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let column = match normalized.as_str() {
            "name" => SortColumn::Name,
            "address" => SortColumn::Address,
            "postalcode" => SortColumn::PostalCode,
            "servicetype" => SortColumn::ServiceType,
            "capacitytype" => SortColumn::CapacityType,
            "sector" => SortColumn::Sector,
            "availablebeds" => SortColumn::AvailableBeds,
            "totalbeds" => SortColumn::TotalBeds,
            "availablerooms" => SortColumn::AvailableRooms,
            "totalrooms" => SortColumn::TotalRooms,
            _ => return Err(UnknownSortColumn(s.to_string())),
        };
        Ok(column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Applies this direction to an ascending ordering.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Selected column and direction. Defaults to name, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header-click behavior: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.reversed();
        } else {
            self.column = column;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Case-insensitive primary ordering with a case-sensitive tie-break.
///
/// Approximates a root-locale collation without pulling in locale data:
/// `"apple" < "Banana" < "cherry"`, and `"a" < "A"` only as a tie-break.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Ascending distance ordering where a missing distance is `+inf`.
#[must_use]
pub fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(f64::INFINITY);
    let b = b.unwrap_or(f64::INFINITY);
    a.total_cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, beds: u32, lat: Option<f64>) -> ShelterRecord {
        ShelterRecord {
            name: name.to_string(),
            address: String::new(),
            postal_code: String::new(),
            service_type: String::new(),
            capacity_type: String::new(),
            sector: String::new(),
            available_beds: beds,
            total_beds: 0,
            available_rooms: 0,
            total_rooms: 0,
            lat,
            lng: None,
        }
    }

    #[test]
    fn text_columns_ignore_case_first() {
        let mut names = vec!["cherry", "Banana", "apple"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["apple", "Banana", "cherry"]);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_tie() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn numeric_columns_compare_arithmetically() {
        let a = record("A", 5, None);
        let b = record("B", 12, None);
        assert_eq!(SortColumn::AvailableBeds.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn coordinates_are_not_sort_columns() {
        for name in ["lat", "lng", "latitude", "longitude"] {
            assert!(name.parse::<SortColumn>().is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn toggle_same_column_flips_direction() {
        let mut sort = SortState::default();
        sort.toggle(SortColumn::Name);
        assert_eq!(sort.direction, SortDirection::Descending);
        sort.toggle(SortColumn::Name);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn toggle_new_column_starts_ascending() {
        let mut sort = SortState::new(SortColumn::Name, SortDirection::Descending);
        sort.toggle(SortColumn::TotalBeds);
        assert_eq!(
            sort,
            SortState::new(SortColumn::TotalBeds, SortDirection::Ascending)
        );
    }

    #[test]
    fn parses_kebab_snake_and_camel_case() {
        assert_eq!(
            "available-beds".parse::<SortColumn>().unwrap(),
            SortColumn::AvailableBeds
        );
        assert_eq!(
            "total_rooms".parse::<SortColumn>().unwrap(),
            SortColumn::TotalRooms
        );
        assert_eq!(
            "serviceType".parse::<SortColumn>().unwrap(),
            SortColumn::ServiceType
        );
        assert!("distance".parse::<SortColumn>().is_err());
    }

    #[test]
    fn every_column_round_trips_through_its_identifier() {
        for column in SortColumn::ALL {
            assert_eq!(column.as_str().parse::<SortColumn>().unwrap(), column);
        }
    }

    #[test]
    fn missing_distance_sorts_last_ascending() {
        assert_eq!(compare_distance(Some(1000.0), None), Ordering::Less);
        assert_eq!(compare_distance(None, None), Ordering::Equal);
    }
}
