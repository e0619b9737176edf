//! Centralized error types for the NearMe application.
//!
//! Each fetcher crate has its own error enum; the view layer maps those into
//! [`AppError`], whose `user_message()` is what ends up on screen. The message
//! prefix is the only thing telling a location fault apart from a weather or
//! places fault, so every variant keeps its own wording.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get the text shown in place of the view.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Location error: {0}")]
    Location(#[from] LocationFailure),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherFailure),

    #[error("Places service error: {0}")]
    Places(#[from] PlacesFailure),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Returns the message rendered in place of all other content.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Location(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Places(e) => e.user_message(),
            AppError::Config(e) => e.user_message().to_string(),
        }
    }
}

/// Host geolocation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationFailure {
    #[error("Geolocation capability not present")]
    Unsupported,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Position unavailable")]
    Unavailable,

    #[error("Timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

impl LocationFailure {
    pub fn user_message(&self) -> String {
        match self {
            LocationFailure::Unsupported => {
                "Geolocation is not supported by this host.".to_string()
            }
            LocationFailure::PermissionDenied => {
                "Location error: permission to read your position was denied.".to_string()
            }
            LocationFailure::Unavailable => {
                "Location error: your position is currently unavailable.".to_string()
            }
            LocationFailure::Timeout => {
                "Location error: timed out while reading your position.".to_string()
            }
            LocationFailure::Other(msg) => format!("Location error: {}", msg),
        }
    }
}

/// Weather provider failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherFailure {
    #[error("Weather data not found (HTTP {status})")]
    NotFound { status: u16 },

    #[error("Weather fetch failed: {0}")]
    Fetch(String),
}

impl WeatherFailure {
    pub fn user_message(&self) -> String {
        match self {
            WeatherFailure::NotFound { .. } => {
                "Error fetching weather data: Weather data not found".to_string()
            }
            WeatherFailure::Fetch(detail) => format!("Error fetching weather data: {}", detail),
        }
    }
}

/// Places provider failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacesFailure {
    #[error("Places data not found (HTTP {status})")]
    NotFound { status: u16 },

    #[error("Places fetch failed: {0}")]
    Fetch(String),
}

impl PlacesFailure {
    pub fn user_message(&self) -> String {
        match self {
            PlacesFailure::NotFound { .. } => {
                "Error fetching places data: Places data not found".to_string()
            }
            PlacesFailure::Fetch(detail) => format!("Error fetching places data: {}", detail),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}
