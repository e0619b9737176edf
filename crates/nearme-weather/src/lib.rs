//! Weather service for NearMe
//!
//! Fetches current conditions for a coordinate from an OpenWeatherMap-style
//! "current weather" endpoint and normalizes the temperature to Celsius.

pub mod provider;
pub mod temperature;
pub mod types;

pub use provider::WeatherProvider;
pub use temperature::{format_celsius, kelvin_to_celsius};
pub use types::*;
