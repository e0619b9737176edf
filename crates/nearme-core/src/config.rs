use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;
use crate::geo::Coordinate;

/// Environment variable holding the weather provider API key
pub const WEATHER_API_KEY_ENV: &str = "NEARME_WEATHER_API_KEY";
/// Environment variable holding the places provider API key
pub const PLACES_API_KEY_ENV: &str = "NEARME_PLACES_API_KEY";
/// Environment variable overriding the places search keyword
pub const PLACES_QUERY_ENV: &str = "NEARME_PLACES_QUERY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// An API key. Never printed: `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key, for building the outgoing request only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Places provider settings
    #[serde(default)]
    pub places: PlacesConfig,

    /// Geolocation settings
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// "Current weather by coordinate" endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// API key; normally supplied through the environment
    #[serde(default)]
    pub api_key: Option<Secret>,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesConfig {
    /// Text-search endpoint
    #[serde(default = "default_places_base_url")]
    pub base_url: String,

    /// API key sent as the Authorization header
    #[serde(default)]
    pub api_key: Option<Secret>,

    /// Category keyword searched around the coordinate
    #[serde(default = "default_places_query")]
    pub query: String,
}

fn default_places_base_url() -> String {
    "https://api.foursquare.com/v3/places/search".to_string()
}

fn default_places_query() -> String {
    "coffee".to_string()
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_places_base_url(),
            api_key: None,
            query: default_places_query(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    /// Static position used instead of querying the host
    #[serde(default)]
    pub fixed: Option<Coordinate>,

    /// Desktop id announced to GeoClue
    #[serde(default = "default_desktop_id")]
    pub desktop_id: String,

    /// How long to wait for the first position fix
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,
}

fn default_desktop_id() -> String {
    "nearme".to_string()
}

fn default_location_timeout() -> u64 {
    30
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            fixed: None,
            desktop_id: default_desktop_id(),
            timeout_secs: default_location_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory (if the file exists)
    /// and apply environment overrides. Nothing is written back.
    ///
    /// # Errors
    /// `Invalid` if the file cannot be read, `ParseError` if it is not valid
    /// TOML or holds out-of-range values.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// # Errors
    /// Anything `load` reports, plus `Invalid` when validation finds errors.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        Self::load()?.into_validated()
    }

    /// Validate, logging warnings; errors reject the configuration.
    fn into_validated(self) -> Result<(Self, ValidationResult), ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    /// Read a TOML config file; a missing file yields the defaults.
    ///
    /// # Errors
    /// `Invalid` if the file cannot be read, `ParseError` if it does not parse.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", path.display(), e.message()))
        })?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(WEATHER_API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.weather.api_key = Some(Secret::new(key));
        }
        if let Some(key) = lookup(PLACES_API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.places.api_key = Some(Secret::new(key));
        }
        if let Some(query) = lookup(PLACES_QUERY_ENV).filter(|v| !v.trim().is_empty()) {
            self.places.query = query;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        validate_url(&self.places.base_url, "places.base_url", &mut result);

        if self.weather.api_key.as_ref().map_or(true, Secret::is_empty) {
            result.add_warning(
                "weather.api_key",
                format!("Not set - export {}", WEATHER_API_KEY_ENV),
            );
        }
        if self.places.api_key.as_ref().map_or(true, Secret::is_empty) {
            result.add_warning(
                "places.api_key",
                format!("Not set - export {}", PLACES_API_KEY_ENV),
            );
        }

        if self.places.query.trim().is_empty() {
            result.add_error("places.query", "Search keyword must not be empty");
        }

        if self.location.timeout_secs == 0 {
            result.add_error("location.timeout_secs", "Timeout must be greater than 0");
        }
        if self.location.desktop_id.trim().is_empty() {
            result.add_warning("location.desktop_id", "Empty desktop id may be rejected by GeoClue");
        }

        result
    }

    /// Get the path to the configuration file
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nearme").join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
