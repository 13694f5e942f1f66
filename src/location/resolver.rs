use log::{info, warn};
use std::sync::Arc;

use crate::config::LocationConfig;
use crate::location::geocode::ReverseGeocoder;
use crate::location::geolocation::{GeoError, GeolocationProvider, PositionOptions};
use crate::models::location::{UNKNOWN_CITY_LABEL, UNKNOWN_COUNTRY_LABEL};
use crate::models::Location;

/// Why the default city is shown instead of the user's own location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationNotice {
    Unavailable,
    Denied,
    TimedOut,
    /// Coordinates were found but could not be named.
    GeocodeFailed,
}

impl LocationNotice {
    pub fn message(&self) -> &'static str {
        match self {
            LocationNotice::Unavailable => "تحديد الموقع غير متاح",
            LocationNotice::Denied => "تم رفض الوصول للموقع",
            LocationNotice::TimedOut => "انتهت مهلة تحديد الموقع",
            LocationNotice::GeocodeFailed => "فشل في تحديد الموقع",
        }
    }
}

impl From<&GeoError> for LocationNotice {
    fn from(e: &GeoError) -> Self {
        match e {
            GeoError::Unavailable(_) => LocationNotice::Unavailable,
            GeoError::PermissionDenied => LocationNotice::Denied,
            GeoError::Timeout(_) => LocationNotice::TimedOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub location: Location,
    pub notice: Option<LocationNotice>,
}

pub struct LocationResolver {
    geolocator: Arc<dyn GeolocationProvider>,
    geocoder: Arc<dyn ReverseGeocoder>,
    options: PositionOptions,
    default: LocationConfig,
}

impl LocationResolver {
    pub fn new(
        geolocator: Arc<dyn GeolocationProvider>,
        geocoder: Arc<dyn ReverseGeocoder>,
        options: PositionOptions,
        default: LocationConfig,
    ) -> Self {
        Self {
            geolocator,
            geocoder,
            options,
            default,
        }
    }

    pub fn default_location(&self) -> Location {
        Location::default_city(&self.default)
    }

    /// Never fails: every failed step degrades to a coarser location.
    pub fn resolve(&self) -> Resolution {
        let coords = match self.geolocator.current_position(&self.options) {
            Ok(c) => c,
            Err(e) => {
                warn!("Geolocation failed, using default city: {}", e);
                return Resolution {
                    location: self.default_location(),
                    notice: Some(LocationNotice::from(&e)),
                };
            }
        };

        match self.geocoder.reverse(coords) {
            Ok(names) => {
                let location = Location {
                    city: names.city.unwrap_or_else(|| UNKNOWN_CITY_LABEL.to_string()),
                    country: names
                        .country
                        .unwrap_or_else(|| UNKNOWN_COUNTRY_LABEL.to_string()),
                    coordinates: Some(coords),
                };
                info!("Located at {} ({})", location.label(), coords);
                Resolution {
                    location,
                    notice: None,
                }
            }
            Err(e) => {
                warn!("Reverse geocoding failed for {}, using default city: {}", coords, e);
                Resolution {
                    location: self.default_location(),
                    notice: Some(LocationNotice::GeocodeFailed),
                }
            }
        }
    }
}
