//! GeoClue2 position lookup over the system D-Bus.
//!
//! One query creates a GeoClue client, starts it, takes the first
//! `LocationUpdated` signal and stops the client again.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use nearme_core::{Coordinate, LocationConfig};
use zbus::zvariant::ObjectPath;
use zbus::Connection;

use crate::error::LocationError;
use crate::provider::LocationProvider;

const GEOCLUE_SERVICE: &str = "org.freedesktop.GeoClue2";

#[zbus::proxy(
    default_service = "org.freedesktop.GeoClue2",
    interface = "org.freedesktop.GeoClue2.Manager",
    default_path = "/org/freedesktop/GeoClue2/Manager"
)]
trait Manager {
    #[zbus(object = "Client")]
    fn get_client(&self);
}

#[zbus::proxy(
    default_service = "org.freedesktop.GeoClue2",
    interface = "org.freedesktop.GeoClue2.Client"
)]
trait Client {
    fn start(&self) -> zbus::Result<()>;

    fn stop(&self) -> zbus::Result<()>;

    #[zbus(property)]
    fn set_desktop_id(&self, id: &str) -> zbus::Result<()>;

    #[zbus(signal)]
    fn location_updated(&self, old: ObjectPath<'_>, new: ObjectPath<'_>) -> zbus::Result<()>;
}

#[zbus::proxy(
    default_service = "org.freedesktop.GeoClue2",
    interface = "org.freedesktop.GeoClue2.Location"
)]
trait Location {
    #[zbus(property)]
    fn latitude(&self) -> zbus::Result<f64>;

    #[zbus(property)]
    fn longitude(&self) -> zbus::Result<f64>;
}

/// Position from the GeoClue2 service.
#[derive(Clone)]
pub struct GeoClueLocation {
    connection: Connection,
    desktop_id: String,
    timeout: Duration,
}

impl GeoClueLocation {
    /// Connect to the system bus and check that GeoClue is running or
    /// activatable. `None` means the capability is absent.
    pub async fn probe(config: &LocationConfig) -> Option<Self> {
        let connection = match Connection::system().await {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("System bus unavailable: {}", e);
                return None;
            }
        };

        match service_present(&connection).await {
            Ok(true) => {
                tracing::info!("Using GeoClue2 for geolocation");
                Some(Self {
                    connection,
                    desktop_id: config.desktop_id.clone(),
                    timeout: Duration::from_secs(config.timeout_secs),
                })
            }
            Ok(false) => {
                tracing::debug!("{} is neither running nor activatable", GEOCLUE_SERVICE);
                None
            }
            Err(e) => {
                tracing::debug!("Could not query the bus for {}: {}", GEOCLUE_SERVICE, e);
                None
            }
        }
    }

    async fn query(&self) -> Result<Coordinate, LocationError> {
        let manager = ManagerProxy::new(&self.connection)
            .await
            .map_err(map_dbus_error)?;
        let client = manager.get_client().await.map_err(map_dbus_error)?;
        client
            .set_desktop_id(&self.desktop_id)
            .await
            .map_err(map_dbus_error)?;

        let mut updates = client
            .receive_location_updated()
            .await
            .map_err(map_dbus_error)?;
        client.start().await.map_err(map_dbus_error)?;

        let fix = async {
            let signal = updates.next().await.ok_or(LocationError::Unavailable)?;
            let args = signal.args().map_err(map_dbus_error)?;

            let location = LocationProxy::builder(&self.connection)
                .path(args.new())
                .map_err(map_dbus_error)?
                .build()
                .await
                .map_err(map_dbus_error)?;

            let latitude = location.latitude().await.map_err(map_dbus_error)?;
            let longitude = location.longitude().await.map_err(map_dbus_error)?;
            Ok::<_, LocationError>(Coordinate::new(latitude, longitude)?)
        };

        first_fix_then_stop(self.timeout, fix, client.stop()).await
    }
}

/// Wait up to `limit` for `fix`, then run `stop` whatever the outcome.
async fn first_fix_then_stop<F, S>(
    limit: Duration,
    fix: F,
    stop: S,
) -> Result<Coordinate, LocationError>
where
    F: Future<Output = Result<Coordinate, LocationError>>,
    S: Future<Output = zbus::Result<()>>,
{
    let result = match tokio::time::timeout(limit, fix).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    };

    if let Err(e) = stop.await {
        tracing::debug!("Failed to stop GeoClue client: {}", e);
    }

    result
}

#[async_trait]
impl LocationProvider for GeoClueLocation {
    fn name(&self) -> &str {
        "geoclue"
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        self.query().await
    }
}

async fn service_present(connection: &Connection) -> zbus::Result<bool> {
    let dbus = zbus::fdo::DBusProxy::new(connection).await?;
    let name = zbus::names::BusName::try_from(GEOCLUE_SERVICE)?;
    if dbus.name_has_owner(name).await? {
        return Ok(true);
    }

    let activatable = dbus.list_activatable_names().await?;
    Ok(activatable.iter().any(|n| n.as_str() == GEOCLUE_SERVICE))
}

fn map_dbus_error(err: zbus::Error) -> LocationError {
    match &err {
        zbus::Error::FDO(fdo) => match &**fdo {
            zbus::fdo::Error::AccessDenied(_) => LocationError::PermissionDenied,
            zbus::fdo::Error::ServiceUnknown(_) | zbus::fdo::Error::NameHasNoOwner(_) => {
                LocationError::Unavailable
            }
            _ => LocationError::Other(err.to_string()),
        },
        zbus::Error::MethodError(name, _, _) if name.as_str().ends_with("AccessDenied") => {
            LocationError::PermissionDenied
        }
        _ => LocationError::Other(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_access_denied_maps_to_permission_denied() {
        let err = zbus::Error::FDO(Box::new(zbus::fdo::Error::AccessDenied(
            "not allowed".to_string(),
        )));
        assert_eq!(map_dbus_error(err), LocationError::PermissionDenied);
    }

    #[test]
    fn test_missing_service_maps_to_unavailable() {
        let err = zbus::Error::FDO(Box::new(zbus::fdo::Error::ServiceUnknown(
            GEOCLUE_SERVICE.to_string(),
        )));
        assert_eq!(map_dbus_error(err), LocationError::Unavailable);
    }

    #[test]
    fn test_other_errors_keep_their_text() {
        let err = zbus::Error::Failure("bus went away".to_string());
        assert!(matches!(map_dbus_error(err), LocationError::Other(msg) if msg.contains("bus went away")));
    }

    #[tokio::test]
    async fn test_client_is_stopped_after_timeout() {
        let stopped = AtomicBool::new(false);
        let stop = async {
            stopped.store(true, Ordering::SeqCst);
            Ok(())
        };

        let never = std::future::pending::<Result<Coordinate, LocationError>>();
        let result = first_fix_then_stop(Duration::from_millis(10), never, stop).await;

        assert_eq!(result, Err(LocationError::Timeout));
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_client_is_stopped_after_fix() {
        let stopped = AtomicBool::new(false);
        let stop = async {
            stopped.store(true, Ordering::SeqCst);
            Err(zbus::Error::Failure("already stopped".to_string()))
        };
        let fix = async { Ok::<_, LocationError>(Coordinate::new(40.0, -74.0)?) };

        let result = first_fix_then_stop(Duration::from_secs(5), fix, stop).await;

        assert_eq!(result.unwrap().latitude(), 40.0);
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    #[ignore] // Needs a running GeoClue2 service: cargo test -p nearme-location -- --ignored
    async fn test_geoclue_live_position() {
        let config = LocationConfig::default();
        let provider = GeoClueLocation::probe(&config).await.unwrap();
        let coordinate = provider.current_position().await.unwrap();
        assert!((-90.0..=90.0).contains(&coordinate.latitude()));
    }
}
