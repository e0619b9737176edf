/// Location service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

impl From<nearme_core::CoordinateError> for LocationError {
    fn from(e: nearme_core::CoordinateError) -> Self {
        LocationError::Other(e.to_string())
    }
}
