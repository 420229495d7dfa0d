//! HTTP clients for the shelter availability API and the place-resolution
//! provider, plus the cancellable load task that feeds an
//! [`AvailabilityView`](shelters_core::AvailabilityView).

pub mod client;
pub mod error;
pub mod geocode;
pub mod load;
pub mod types;

pub use client::AvailabilityClient;
pub use error::{ClientError, GeocodeError};
pub use geocode::PlaceResolver;
pub use load::{load_into, LoadTask};
