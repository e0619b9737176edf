//! View state and its transitions.
//!
//! `ViewState::apply` consumes the old state and returns the new one; nothing
//! is mutated behind the renderer's back. Coordinate, weather and places are
//! each written at most once. The failure slot keeps whichever failure landed
//! last.

use nearme_core::{AppError, Coordinate};
use nearme_places::Place;
use nearme_weather::WeatherSnapshot;

/// Outcome of one asynchronous step of a session
#[derive(Debug)]
pub enum SessionMessage {
    LocationResolved(Coordinate),
    LocationFailed(AppError),
    WeatherDone(Result<WeatherSnapshot, AppError>),
    PlacesDone(Result<Vec<Place>, AppError>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Category keyword the places list was searched with
    pub query: String,
    pub coordinate: Option<Coordinate>,
    pub weather: Option<WeatherSnapshot>,
    pub places: Option<Vec<Place>>,
    /// User-visible failure message; suppresses everything else
    pub failure: Option<String>,
}

impl ViewState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            coordinate: None,
            weather: None,
            places: None,
            failure: None,
        }
    }

    /// A state that only carries a failure, for errors before a session starts.
    pub fn failed(query: impl Into<String>, error: &AppError) -> Self {
        Self {
            failure: Some(error.user_message()),
            ..Self::new(query)
        }
    }

    #[must_use]
    pub fn apply(self, message: SessionMessage) -> Self {
        match message {
            SessionMessage::LocationResolved(coordinate) => {
                if self.coordinate.is_some() {
                    tracing::debug!("Ignoring second location fix");
                    return self;
                }
                Self {
                    coordinate: Some(coordinate),
                    ..self
                }
            }
            SessionMessage::LocationFailed(error) => self.with_failure(&error),
            SessionMessage::WeatherDone(Ok(snapshot)) => {
                if self.weather.is_some() {
                    return self;
                }
                Self {
                    weather: Some(snapshot),
                    ..self
                }
            }
            SessionMessage::WeatherDone(Err(error)) => self.with_failure(&error),
            SessionMessage::PlacesDone(Ok(places)) => {
                if self.places.is_some() {
                    return self;
                }
                Self {
                    places: Some(places),
                    ..self
                }
            }
            SessionMessage::PlacesDone(Err(error)) => self.with_failure(&error),
        }
    }

    fn with_failure(self, error: &AppError) -> Self {
        tracing::warn!("{}", error);
        Self {
            failure: Some(error.user_message()),
            ..self
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}
