use async_trait::async_trait;
use nearme_core::Coordinate;

use crate::error::LocationError;

/// The host's one-shot "get current position" capability.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Ask the host for its current position.
    ///
    /// # Errors
    /// Permission, availability and timeout failures of the host service.
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}
