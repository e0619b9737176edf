//! One resolve-then-fetch run.
//!
//! The location is queried once. On success the weather and places requests
//! are spawned back-to-back and report through an mpsc channel; the session
//! folds each report into the view state as it arrives.

use std::sync::Arc;

use nearme_core::{AppError, Config, Coordinate};
use nearme_location::LocationProvider;
use nearme_places::PlacesClient;
use nearme_weather::WeatherProvider;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error_mapping::IntoAppError;
use crate::state::{SessionMessage, ViewState};

pub struct Session {
    location: Option<Box<dyn LocationProvider>>,
    weather: Arc<WeatherProvider>,
    places: Arc<PlacesClient>,
    cancel: CancellationToken,
}

impl Session {
    /// `location` is the host capability; `None` means the host has none.
    pub fn new(
        location: Option<Box<dyn LocationProvider>>,
        weather: WeatherProvider,
        places: PlacesClient,
    ) -> Self {
        Self {
            location,
            weather: Arc::new(weather),
            places: Arc::new(places),
            cancel: CancellationToken::new(),
        }
    }

    /// Build the providers from configuration and detect the host capability.
    ///
    /// # Errors
    /// Only if an HTTP client cannot be constructed.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let weather = WeatherProvider::new(&config.weather).map_err(IntoAppError::into_app_error)?;
        let places = PlacesClient::new(&config.places).map_err(IntoAppError::into_app_error)?;
        let location = nearme_location::detect(&config.location).await;
        Ok(Self::new(location, weather, places))
    }

    /// Token that tears the session down. Results arriving afterwards are
    /// dropped; requests already in flight are left to finish on their own.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the session to completion or teardown, calling `on_update` with
    /// every new state.
    pub async fn run<F>(self, mut on_update: F) -> ViewState
    where
        F: FnMut(&ViewState),
    {
        let mut state = ViewState::new(self.places.query());
        on_update(&state);

        let located = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::info!("Session torn down before location resolved");
                return state;
            }
            result = nearme_location::resolve(self.location.as_deref()) => result,
        };

        let coordinate = match located {
            Ok(coordinate) => coordinate,
            Err(e) => {
                state = state.apply(SessionMessage::LocationFailed(e.into_app_error()));
                on_update(&state);
                return state;
            }
        };
        state = state.apply(SessionMessage::LocationResolved(coordinate));
        on_update(&state);

        let (tx, mut rx) = mpsc::unbounded_channel();
        request_weather(&tx, self.weather.clone(), coordinate);
        request_places(&tx, self.places.clone(), coordinate);
        drop(tx);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::info!("Session torn down; discarding pending results");
                    break;
                }
                message = rx.recv() => match message {
                    Some(message) => {
                        state = state.apply(message);
                        on_update(&state);
                    }
                    None => break,
                },
            }
        }

        tracing::info!("Session finished");
        state
    }
}

/// Fetch weather off the session loop; sends `WeatherDone` when complete.
fn request_weather(
    tx: &mpsc::UnboundedSender<SessionMessage>,
    provider: Arc<WeatherProvider>,
    coordinate: Coordinate,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = provider
            .fetch(&coordinate)
            .await
            .map_err(IntoAppError::into_app_error);
        if tx.send(SessionMessage::WeatherDone(result)).is_err() {
            tracing::debug!("Session gone; dropping weather result");
        }
    });
}

/// Fetch places off the session loop; sends `PlacesDone` when complete.
fn request_places(
    tx: &mpsc::UnboundedSender<SessionMessage>,
    client: Arc<PlacesClient>,
    coordinate: Coordinate,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client
            .search_nearby(&coordinate)
            .await
            .map_err(IntoAppError::into_app_error);
        if tx.send(SessionMessage::PlacesDone(result)).is_err() {
            tracing::debug!("Session gone; dropping places result");
        }
    });
}
