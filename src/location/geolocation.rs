use log::debug;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::{GeoProviderKind, GeolocationConfig};
use crate::models::Coordinates;
use crate::utils::http::{get_json, HttpError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub timeout: Duration,
    /// A cached position younger than this is returned without a new lookup.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(300),
        }
    }
}

impl From<&GeolocationConfig> for PositionOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            maximum_age: Duration::from_secs(config.max_age_secs),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeoError {
    #[error("geolocation unavailable: {0}")]
    Unavailable(String),
    #[error("geolocation permission denied")]
    PermissionDenied,
    #[error("geolocation timed out after {0:?}")]
    Timeout(Duration),
}

/// Something that can tell where the user is.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, GeoError>;
}

// ─── IP lookup ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct IpLookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

pub struct IpGeolocator {
    endpoint: String,
}

impl IpGeolocator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl GeolocationProvider for IpGeolocator {
    fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, GeoError> {
        let started = Instant::now();
        let response: IpLookupResponse = get_json(&self.endpoint, &[], options.timeout)
            .map_err(|e| match e {
                HttpError::Transport(_) if started.elapsed() >= options.timeout => {
                    GeoError::Timeout(options.timeout)
                }
                other => GeoError::Unavailable(other.to_string()),
            })?;

        match (response.latitude, response.longitude) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(GeoError::Unavailable("lookup returned no coordinates".into())),
        }
    }
}

// ─── Static providers ────────────────────────────────────────────────────────

/// Always answers with the same coordinates.
pub struct FixedPosition(pub Coordinates);

impl GeolocationProvider for FixedPosition {
    fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

/// No capability at all.
pub struct NoGeolocation(pub &'static str);

impl GeolocationProvider for NoGeolocation {
    fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates, GeoError> {
        Err(GeoError::Unavailable(self.0.to_string()))
    }
}

/// The user refused to share a position.
pub struct Denied;

impl GeolocationProvider for Denied {
    fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates, GeoError> {
        Err(GeoError::PermissionDenied)
    }
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// Reuses the last successful position while it is younger than `maximum_age`.
pub struct CachedGeolocator<P> {
    inner: P,
    last: Mutex<Option<(Instant, Coordinates)>>,
}

impl<P: GeolocationProvider> CachedGeolocator<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            last: Mutex::new(None),
        }
    }
}

impl<P: GeolocationProvider> GeolocationProvider for CachedGeolocator<P> {
    fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, GeoError> {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((taken, coords)) = *last {
            if taken.elapsed() < options.maximum_age {
                debug!("Reusing cached position {}", coords);
                return Ok(coords);
            }
        }
        let coords = self.inner.current_position(options)?;
        *last = Some((Instant::now(), coords));
        Ok(coords)
    }
}

/// Build the provider described by the `[geolocation]` config section.
pub fn provider_from_config(config: &GeolocationConfig) -> Arc<dyn GeolocationProvider> {
    if !config.allow {
        return Arc::new(Denied);
    }
    match config.provider {
        GeoProviderKind::Ip => Arc::new(CachedGeolocator::new(IpGeolocator::new(
            config.endpoint.clone(),
        ))),
        GeoProviderKind::Fixed => match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Arc::new(FixedPosition(Coordinates::new(lat, lon))),
            _ => Arc::new(NoGeolocation("no coordinates configured")),
        },
        GeoProviderKind::Off => Arc::new(NoGeolocation("geolocation is turned off")),
    }
}
