//! Domain model and client-side data shaping for the shelter availability view.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod links;
pub mod shelter;
pub mod view;

use thiserror::Error;

pub use app_config::{AppConfig, ViewCapabilities};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use links::map_search_url;
pub use shelter::{parse_update_date, ShelterRecord, ShelterSnapshot};
pub use view::{
    derive_rows, AddressResolution, AvailabilityView, FilterDimension, FilterOptions,
    FilterState, LoadFailure, LoadState, LoadTicket, ReferenceLocation, ResolveRejected,
    ResolveTicket, ShelterRow, SortColumn, SortDirection, SortState,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
