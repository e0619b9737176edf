use nearme_core::{AppError, PlacesFailure};
use nearme_places::PlacesError;

use super::IntoAppError;

impl IntoAppError for PlacesError {
    fn into_app_error(self) -> AppError {
        let failure = match self {
            PlacesError::NotFound { status } => PlacesFailure::NotFound { status },
            PlacesError::Network(e) => PlacesFailure::Fetch(e.to_string()),
            PlacesError::Parse(msg) => PlacesFailure::Fetch(msg),
        };
        AppError::Places(failure)
    }
}
