use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ServiceConfig;
use crate::models::Coordinates;
use crate::utils::http::{get_json, HttpError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("reverse geocoding failed: {0}")]
    Http(#[from] HttpError),
}

/// Names for a coordinate pair. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceNames {
    pub city: Option<String>,
    pub country: Option<String>,
}

pub trait ReverseGeocoder: Send + Sync {
    fn reverse(&self, coords: Coordinates) -> Result<PlaceNames, GeocodeError>;
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<ReverseGeocodeResponse> for PlaceNames {
    fn from(r: ReverseGeocodeResponse) -> Self {
        Self {
            city: non_empty(r.city).or_else(|| non_empty(r.locality)),
            country: non_empty(r.country_name),
        }
    }
}

/// Client for the BigDataCloud reverse-geocode endpoint.
pub struct BigDataCloud {
    base: String,
    language: String,
    timeout: Duration,
}

impl BigDataCloud {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            base: config.geocode_base.clone(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl ReverseGeocoder for BigDataCloud {
    fn reverse(&self, coords: Coordinates) -> Result<PlaceNames, GeocodeError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();
        let response: ReverseGeocodeResponse = get_json(
            &self.base,
            &[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("localityLanguage", self.language.as_str()),
            ],
            self.timeout,
        )?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::tests::serve_once;

    fn names(json: &str) -> PlaceNames {
        serde_json::from_str::<ReverseGeocodeResponse>(json)
            .unwrap()
            .into()
    }

    #[test]
    fn prefers_city_over_locality() {
        let n = names(r#"{"city":"جدة","locality":"البلد","countryName":"السعودية"}"#);
        assert_eq!(n.city.as_deref(), Some("جدة"));
        assert_eq!(n.country.as_deref(), Some("السعودية"));
    }

    #[test]
    fn empty_city_falls_back_to_locality() {
        let n = names(r#"{"city":"","locality":"Al Khobar"}"#);
        assert_eq!(n.city.as_deref(), Some("Al Khobar"));
        assert_eq!(n.country, None);
    }

    #[test]
    fn nothing_useful() {
        assert_eq!(names("{}"), PlaceNames::default());
    }

    #[test]
    fn bigdatacloud_request() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"city":"","locality":"مكة","countryName":"السعودية"}"#,
        );
        let client = BigDataCloud::new(&ServiceConfig {
            geocode_base: format!("{}/data/reverse-geocode-client", base),
            ..ServiceConfig::default()
        });
        let names = client.reverse(Coordinates::new(21.42, 39.82)).unwrap();
        assert_eq!(names.city.as_deref(), Some("مكة"));
        assert_eq!(
            server.join().unwrap(),
            "GET /data/reverse-geocode-client?latitude=21.42&longitude=39.82&localityLanguage=ar HTTP/1.1"
        );
    }

    #[test]
    fn bigdatacloud_failure_is_an_error() {
        let (base, server) = serve_once("500 Internal Server Error", "{}");
        let client = BigDataCloud::new(&ServiceConfig {
            geocode_base: base,
            ..ServiceConfig::default()
        });
        assert_eq!(
            client.reverse(Coordinates::new(21.42, 39.82)),
            Err(GeocodeError::Http(HttpError::Status(500)))
        );
        server.join().unwrap();
    }
}
