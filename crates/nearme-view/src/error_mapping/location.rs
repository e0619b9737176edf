use nearme_core::{AppError, LocationFailure};
use nearme_location::LocationError;

use super::IntoAppError;

impl IntoAppError for LocationError {
    fn into_app_error(self) -> AppError {
        let failure = match self {
            LocationError::Unsupported => LocationFailure::Unsupported,
            LocationError::PermissionDenied => LocationFailure::PermissionDenied,
            LocationError::Unavailable => LocationFailure::Unavailable,
            LocationError::Timeout => LocationFailure::Timeout,
            LocationError::Other(msg) => LocationFailure::Other(msg),
        };
        AppError::Location(failure)
    }
}
