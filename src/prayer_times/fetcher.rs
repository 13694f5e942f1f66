use log::{info, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{LocationConfig, ServiceConfig};
use crate::models::{Coordinates, Location, PrayerSchedule, PrayerType, ScheduleError};
use crate::utils::http::{get_json, HttpError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("service answered with code {0}")]
    Code(i64),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("bad schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Body of a timings response: `{code, data: {timings: {Fajr: "HH:MM", ...}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingsResponse {
    pub code: i64,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl TimingsResponse {
    pub fn into_schedule(self) -> Result<PrayerSchedule, FetchError> {
        if self.code != 200 {
            return Err(FetchError::Code(self.code));
        }
        let timings = self
            .data
            .get("timings")
            .and_then(|t| t.as_object())
            .ok_or_else(|| FetchError::Malformed("missing data.timings".into()))?;

        let mut raw = [""; 5];
        for prayer in PrayerType::ALL {
            raw[prayer.index()] = timings
                .get(prayer.api_key())
                .and_then(|v| v.as_str())
                .ok_or_else(|| FetchError::Malformed(format!("missing {}", prayer.api_key())))?;
        }
        Ok(PrayerSchedule::from_strings(|p| raw[p.index()])?)
    }
}

/// The prayer-times web service.
pub trait TimingsApi: Send + Sync {
    fn by_coordinates(&self, coords: Coordinates) -> Result<TimingsResponse, FetchError>;
    fn by_city(&self, city: &str, country: &str) -> Result<TimingsResponse, FetchError>;
}

/// Client for the Aladhan timings API.
pub struct Aladhan {
    base: String,
    method: String,
    timeout: Duration,
}

impl Aladhan {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            base: config.timings_base.trim_end_matches('/').to_string(),
            method: config.method.to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl TimingsApi for Aladhan {
    fn by_coordinates(&self, coords: Coordinates) -> Result<TimingsResponse, FetchError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();
        let url = format!("{}/timings", self.base);
        Ok(get_json(
            &url,
            &[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("method", self.method.as_str()),
            ],
            self.timeout,
        )?)
    }

    fn by_city(&self, city: &str, country: &str) -> Result<TimingsResponse, FetchError> {
        let url = format!("{}/timingsByCity", self.base);
        Ok(get_json(
            &url,
            &[
                ("city", city),
                ("country", country),
                ("method", self.method.as_str()),
            ],
            self.timeout,
        )?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Coordinates,
    City,
    /// The static table; the service could not be reached or made no sense.
    Fallback,
}

impl ScheduleSource {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleSource::Coordinates => "حسب الإحداثيات",
            ScheduleSource::City => "حسب المدينة",
            ScheduleSource::Fallback => "أوقات افتراضية",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSchedule {
    pub schedule: PrayerSchedule,
    pub source: ScheduleSource,
}

/// Fetches today's schedule, degrading coordinates -> city -> static table.
pub struct ScheduleFetcher {
    api: Arc<dyn TimingsApi>,
    city: String,
    country: String,
}

impl ScheduleFetcher {
    pub fn new(api: Arc<dyn TimingsApi>, default: &LocationConfig) -> Self {
        Self {
            api,
            city: default.city.clone(),
            country: default.country.clone(),
        }
    }

    pub fn fetch(&self, location: &Location) -> FetchedSchedule {
        match location.coordinates {
            Some(coords) => self.by_coordinates(coords),
            None => self.by_city(),
        }
    }

    pub fn by_coordinates(&self, coords: Coordinates) -> FetchedSchedule {
        match self
            .api
            .by_coordinates(coords)
            .and_then(TimingsResponse::into_schedule)
        {
            Ok(schedule) => {
                info!("Loaded prayer times for {}", coords);
                FetchedSchedule {
                    schedule,
                    source: ScheduleSource::Coordinates,
                }
            }
            Err(e) => {
                warn!("Prayer times by coordinates failed, trying city: {}", e);
                self.by_city()
            }
        }
    }

    pub fn by_city(&self) -> FetchedSchedule {
        match self
            .api
            .by_city(&self.city, &self.country)
            .and_then(TimingsResponse::into_schedule)
        {
            Ok(schedule) => {
                info!("Loaded prayer times for {}, {}", self.city, self.country);
                FetchedSchedule {
                    schedule,
                    source: ScheduleSource::City,
                }
            }
            Err(e) => {
                warn!("Prayer times by city failed, using fallback times: {}", e);
                FetchedSchedule {
                    schedule: PrayerSchedule::fallback(),
                    source: ScheduleSource::Fallback,
                }
            }
        }
    }
}
