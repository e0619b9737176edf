use nearme_core::{AppError, WeatherFailure};
use nearme_weather::WeatherError;

use super::IntoAppError;

impl IntoAppError for WeatherError {
    fn into_app_error(self) -> AppError {
        let failure = match self {
            WeatherError::NotFound { status } => WeatherFailure::NotFound { status },
            WeatherError::Network(e) => WeatherFailure::Fetch(e.to_string()),
            WeatherError::Parse(msg) => WeatherFailure::Fetch(msg),
        };
        AppError::Weather(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_status() {
        let err = WeatherError::NotFound { status: 404 }.into_app_error();
        assert!(matches!(
            err,
            AppError::Weather(WeatherFailure::NotFound { status: 404 })
        ));
    }

    #[test]
    fn test_parse_error_is_prefixed() {
        let err = WeatherError::Parse("missing field `main`".into()).into_app_error();
        assert_eq!(
            err.user_message(),
            "Error fetching weather data: missing field `main`"
        );
    }
}
