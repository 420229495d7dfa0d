//! The availability view: owned state plus the events that mutate it.
//!
//! Every mutation goes through a discrete event method (load completion,
//! filter selection, sort selection, place resolution). Asynchronous work is
//! represented by tickets: a result is committed only when its ticket is the
//! most recent one issued and the view has not been torn down.

use crate::app_config::{AppConfig, ViewCapabilities};
use crate::geo::GeoPoint;
use crate::links::{map_search_url, DEFAULT_MAP_SEARCH_URL};
use crate::shelter::{ShelterRecord, ShelterSnapshot};

use super::{
    derive_rows, FilterDimension, FilterOptions, FilterState, ShelterRow, SortColumn,
    SortDirection, SortState,
};

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// A failed load, carrying the message shown in place of the data views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    message: String,
}

impl LoadFailure {
    /// Uses `description` as the message, or a generic fallback when blank.
    #[must_use]
    pub fn from_description(description: &str) -> Self {
        let trimmed = description.trim();
        let message = if trimmed.is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { message }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No load has been started yet.
    Idle,
    Loading,
    Loaded(ShelterSnapshot),
    Failed(LoadFailure),
}

/// Issued by [`AvailabilityView::begin_load`]; redeemed by `commit_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Issued by [`AvailabilityView::begin_resolve`]; redeemed by `commit_resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveTicket {
    generation: u64,
}

/// A resolved place used as the origin for distance ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLocation {
    pub formatted_address: String,
    pub point: GeoPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddressResolution {
    Idle,
    Resolving { query: String },
    Resolved(ReferenceLocation),
    /// Non-blocking: the data view keeps rendering and the previous
    /// reference location (if any) stays in effect.
    Failed { query: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveRejected {
    #[error("Please enter an address to search from.")]
    EmptyQuery,
    #[error("distance sorting is disabled")]
    DistanceSortDisabled,
}

#[derive(Debug)]
pub struct AvailabilityView {
    capabilities: ViewCapabilities,
    map_search_url: String,
    load: LoadState,
    load_generation: u64,
    active: bool,
    filters: FilterState,
    sort: SortState,
    reference: Option<ReferenceLocation>,
    resolution: AddressResolution,
    resolve_generation: u64,
}

impl AvailabilityView {
    #[must_use]
    pub fn new(capabilities: ViewCapabilities, map_search_url: impl Into<String>) -> Self {
        Self {
            capabilities,
            map_search_url: map_search_url.into(),
            load: LoadState::Idle,
            load_generation: 0,
            active: true,
            filters: FilterState::default(),
            sort: SortState::default(),
            reference: None,
            resolution: AddressResolution::Idle,
            resolve_generation: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.capabilities, config.map_search_url.clone())
    }

    // --- loading -------------------------------------------------------

    /// Marks the view as loading and returns the ticket the result must carry.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.load = LoadState::Loading;
        LoadTicket {
            generation: self.load_generation,
        }
    }

    /// Commits a load result. Returns `false` (and changes nothing) when the
    /// ticket is stale or the view has been torn down.
    ///
    /// A failure discards any previously loaded records; data views are never
    /// rendered from partial or stale data next to an error.
    pub fn commit_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ShelterSnapshot, LoadFailure>,
    ) -> bool {
        if !self.active || ticket.generation != self.load_generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.load_generation,
                active = self.active,
                "discarding superseded load result"
            );
            return false;
        }

        self.load = match result {
            Ok(snapshot) => {
                tracing::info!(records = snapshot.records.len(), "shelter data loaded");
                LoadState::Loaded(snapshot)
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "shelter data failed to load");
                LoadState::Failed(failure)
            }
        };
        true
    }

    /// Deactivates the view; in-flight results will be discarded on commit.
    pub fn teardown(&mut self) {
        self.active = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadFailure> {
        match &self.load {
            LoadState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&ShelterSnapshot> {
        match &self.load {
            LoadState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Loaded records; empty unless the view is in the loaded state.
    #[must_use]
    pub fn records(&self) -> &[ShelterRecord] {
        self.snapshot()
            .map(|s| s.records.as_slice())
            .unwrap_or_default()
    }

    // --- filtering and sorting ----------------------------------------

    #[must_use]
    pub fn capabilities(&self) -> ViewCapabilities {
        self.capabilities
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Selects (or with `None`, clears) the filter for one dimension.
    ///
    /// Ignored when filtering is disabled.
    pub fn set_filter(&mut self, dimension: FilterDimension, value: Option<String>) {
        if !self.capabilities.filtering {
            tracing::debug!(%dimension, "filtering disabled; ignoring selection");
            return;
        }
        self.filters.set(dimension, value);
    }

    #[must_use]
    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Header-click semantics; see [`SortState::toggle`].
    pub fn select_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Distinct filter values across every loaded record.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(self.records())
    }

    /// The ordered rows to display. Empty while loading or after a failure.
    #[must_use]
    pub fn rows(&self) -> Vec<ShelterRow<'_>> {
        let inactive = FilterState::default();
        let filters = if self.capabilities.filtering {
            &self.filters
        } else {
            &inactive
        };
        let origin = self.reference.as_ref().map(|r| r.point);

        let mut rows = derive_rows(self.records(), filters, self.sort, origin);
        if self.capabilities.map_links {
            for row in &mut rows {
                row.map_link = map_search_url(&self.map_search_url, &row.record.address);
            }
        }
        rows
    }

    // --- reference location -------------------------------------------

    #[must_use]
    pub fn reference(&self) -> Option<&ReferenceLocation> {
        self.reference.as_ref()
    }

    #[must_use]
    pub fn resolution(&self) -> &AddressResolution {
        &self.resolution
    }

    /// Starts resolving a free-text address.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveRejected::EmptyQuery`] for a blank query (the failure
    /// is also recorded as the resolution state) and
    /// [`ResolveRejected::DistanceSortDisabled`] when the capability is off.
    pub fn begin_resolve(&mut self, query: &str) -> Result<ResolveTicket, ResolveRejected> {
        if !self.capabilities.distance_sort {
            return Err(ResolveRejected::DistanceSortDisabled);
        }
        let query = query.trim();
        self.resolve_generation += 1;
        if query.is_empty() {
            self.resolution = AddressResolution::Failed {
                query: String::new(),
                message: ResolveRejected::EmptyQuery.to_string(),
            };
            return Err(ResolveRejected::EmptyQuery);
        }
        self.resolution = AddressResolution::Resolving {
            query: query.to_string(),
        };
        Ok(ResolveTicket {
            generation: self.resolve_generation,
        })
    }

    /// Commits a place resolution. Returns `false` when the ticket is stale.
    ///
    /// Success replaces the reference location and resets ordering to
    /// ascending distance. Failure leaves the previous reference in place and
    /// records a non-blocking message.
    pub fn commit_resolve(
        &mut self,
        ticket: ResolveTicket,
        result: Result<ReferenceLocation, String>,
    ) -> bool {
        if !self.active || ticket.generation != self.resolve_generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.resolve_generation,
                "discarding superseded place resolution"
            );
            return false;
        }
        let query = match &self.resolution {
            AddressResolution::Resolving { query } => query.clone(),
            _ => String::new(),
        };

        match result {
            Ok(location) => {
                tracing::info!(
                    address = %location.formatted_address,
                    lat = location.point.lat,
                    lng = location.point.lng,
                    "reference location set"
                );
                self.reference = Some(location.clone());
                self.sort.direction = SortDirection::Ascending;
                self.resolution = AddressResolution::Resolved(location);
            }
            Err(message) => {
                tracing::warn!(%query, %message, "could not resolve address");
                self.resolution = AddressResolution::Failed { query, message };
            }
        }
        true
    }
}

impl Default for AvailabilityView {
    fn default() -> Self {
        Self::new(ViewCapabilities::default(), DEFAULT_MAP_SEARCH_URL)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
