//! Nearby places for NearMe.
//!
//! Text search against a Foursquare-style places endpoint, filtered to venues
//! open now and sorted by distance from the coordinate.

pub mod client;
pub mod types;

pub use client::PlacesClient;
pub use types::{Place, PlacesError};
