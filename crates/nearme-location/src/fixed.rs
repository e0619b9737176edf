use async_trait::async_trait;
use nearme_core::Coordinate;

use crate::error::LocationError;
use crate::provider::LocationProvider;

/// A position taken from configuration instead of the host.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinate: Coordinate,
}

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_location_returns_configured_coordinate() {
        let coordinate = Coordinate::new(51.5, -0.12).unwrap();
        let provider = FixedLocation::new(coordinate);
        assert_eq!(provider.current_position().await, Ok(coordinate));
    }
}
