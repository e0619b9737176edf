use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::temperature::{format_celsius, kelvin_to_celsius};

/// Current conditions at the resolved coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub description: String,
    pub temperature_celsius: Decimal,
}

impl WeatherSnapshot {
    /// Temperature as shown to the user, two decimal places.
    pub fn display_temperature(&self) -> String {
        format_celsius(self.temperature_celsius)
    }

    pub(crate) fn from_response(body: CurrentWeatherResponse) -> Result<Self, WeatherError> {
        let description = body
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| WeatherError::Parse("response has no weather conditions".into()))?;

        let temperature_celsius = kelvin_to_celsius(body.main.temp).ok_or_else(|| {
            WeatherError::Parse(format!("temperature out of range: {}", body.main.temp))
        })?;

        Ok(Self {
            description,
            temperature_celsius,
        })
    }
}

/// "Current weather by coordinate" body. Only the fields we render.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    pub weather: Vec<Condition>,
    pub main: MainReadings,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Condition {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    /// Kelvin
    pub temp: f64,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather data not found (HTTP {status})")]
    NotFound { status: u16 },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<WeatherSnapshot, WeatherError> {
        let body: CurrentWeatherResponse = serde_json::from_value(json).unwrap();
        WeatherSnapshot::from_response(body)
    }

    #[test]
    fn test_first_condition_wins() {
        let snapshot = parse(serde_json::json!({
            "weather": [
                {"id": 800, "main": "Clear", "description": "clear sky"},
                {"id": 701, "main": "Mist", "description": "mist"}
            ],
            "main": {"temp": 300.0, "humidity": 40}
        }))
        .unwrap();

        assert_eq!(snapshot.description, "clear sky");
        assert_eq!(snapshot.display_temperature(), "26.85");
    }

    #[test]
    fn test_empty_conditions_is_parse_error() {
        let result = parse(serde_json::json!({
            "weather": [],
            "main": {"temp": 280.0}
        }));
        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_huge_temperature_is_out_of_range() {
        let result = parse(serde_json::json!({
            "weather": [{"description": "clear sky"}],
            "main": {"temp": 1e30}
        }));
        assert!(matches!(result, Err(WeatherError::Parse(msg)) if msg.contains("out of range")));
    }

    #[test]
    fn test_missing_main_fails_to_deserialize() {
        let result: Result<CurrentWeatherResponse, _> =
            serde_json::from_value(serde_json::json!({"weather": []}));
        assert!(result.is_err());
    }
}
