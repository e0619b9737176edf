//! Host geolocation for NearMe.
//!
//! A [`LocationProvider`] is the host's one-shot "get current position"
//! capability. Hosts without one get `None` from [`detect`], and [`resolve`]
//! turns that into [`LocationError::Unsupported`] without attempting anything.

pub mod error;
pub mod fixed;
#[cfg(target_os = "linux")]
pub mod geoclue;
pub mod provider;

pub use error::LocationError;
pub use fixed::FixedLocation;
#[cfg(target_os = "linux")]
pub use geoclue::GeoClueLocation;
pub use provider::LocationProvider;

use nearme_core::{Coordinate, LocationConfig};

/// Query the capability exactly once.
///
/// # Errors
/// `Unsupported` when no capability is present, otherwise whatever the
/// provider reports.
pub async fn resolve(
    capability: Option<&dyn LocationProvider>,
) -> Result<Coordinate, LocationError> {
    let Some(provider) = capability else {
        tracing::warn!("Geolocation capability not present on this host");
        return Err(LocationError::Unsupported);
    };

    tracing::debug!("Requesting current position from {}", provider.name());
    match provider.current_position().await {
        Ok(coordinate) => {
            tracing::info!("Got location: {}", coordinate);
            Ok(coordinate)
        }
        Err(e) => {
            tracing::warn!("Location query via {} failed: {}", provider.name(), e);
            Err(e)
        }
    }
}

/// Pick the capability available on this host.
///
/// A configured fixed position wins; otherwise GeoClue is used on Linux when
/// the service is reachable.
pub async fn detect(config: &LocationConfig) -> Option<Box<dyn LocationProvider>> {
    if let Some(coordinate) = config.fixed {
        tracing::info!("Using configured fixed location");
        return Some(Box::new(FixedLocation::new(coordinate)));
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(geoclue) = GeoClueLocation::probe(config).await {
            return Some(Box::new(geoclue));
        }
    }

    tracing::info!("No geolocation capability detected");
    None
}
