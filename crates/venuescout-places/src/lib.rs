//! Client and discovery pipeline for the places-search web service.

pub mod client;
pub mod discover;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use client::{PlacesClient, RetryPolicy, DETAIL_FIELDS};
pub use discover::{discover_venues, DiscoveryOutcome, SeenPlaces};
pub use error::PlacesError;
pub use normalize::event_from_detail;
pub use types::{Place, PlaceDetail};
