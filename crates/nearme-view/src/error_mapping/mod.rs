//! Conversions from the fetcher crates' errors into `AppError`.

mod location;
mod places;
mod weather;

use nearme_core::AppError;

/// Lift a crate-local error into the application error hierarchy.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
