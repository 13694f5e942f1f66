use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `tick_ms` below this is raised to it; zero would spin the input thread.
pub const MIN_TICK_MS: u64 = 50;

fn default_city() -> String {
    "Riyadh".to_string()
}
fn default_country() -> String {
    "Saudi Arabia".to_string()
}
fn default_city_label() -> String {
    "الرياض".to_string()
}
fn default_country_label() -> String {
    "المملكة العربية السعودية".to_string()
}
fn default_provider() -> GeoProviderKind {
    GeoProviderKind::Ip
}
fn default_geo_endpoint() -> String {
    "https://ipapi.co/json/".to_string()
}
fn default_geo_timeout_secs() -> u64 {
    10
}
fn default_max_age_secs() -> u64 {
    300
}
fn default_timings_base() -> String {
    "https://api.aladhan.com/v1".to_string()
}
fn default_geocode_base() -> String {
    "https://api.bigdatacloud.net/data/reverse-geocode-client".to_string()
}
fn default_method() -> u8 {
    4
}
fn default_language() -> String {
    "ar".to_string()
}
fn default_service_timeout_secs() -> u64 {
    10
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_true() -> bool {
    true
}

/// Default city, used whenever the user's own location can't be resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// City name sent to the prayer-times service.
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_country")]
    pub country: String,
    /// Shown to the user.
    #[serde(default = "default_city_label")]
    pub city_label: String,
    #[serde(default = "default_country_label")]
    pub country_label: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
            city_label: default_city_label(),
            country_label: default_country_label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoProviderKind {
    /// IP-based lookup over HTTP.
    Ip,
    /// The `latitude`/`longitude` below.
    Fixed,
    /// No geolocation capability.
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default = "default_provider")]
    pub provider: GeoProviderKind,
    /// `false` behaves like a denied permission prompt.
    #[serde(default = "default_true")]
    pub allow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default = "default_geo_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_geo_timeout_secs")]
    pub timeout_secs: u64,
    /// How old a previously obtained position may be and still be reused.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            allow: true,
            latitude: None,
            longitude: None,
            endpoint: default_geo_endpoint(),
            timeout_secs: default_geo_timeout_secs(),
            max_age_secs: default_max_age_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_timings_base")]
    pub timings_base: String,
    #[serde(default = "default_geocode_base")]
    pub geocode_base: String,
    /// Calculation method id understood by the prayer-times service.
    #[serde(default = "default_method")]
    pub method: u8,
    /// Language for reverse-geocoded labels.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_service_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            timings_base: default_timings_base(),
            geocode_base: default_geocode_base(),
            method: default_method(),
            language: default_language(),
            timeout_secs: default_service_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Days to add/subtract from the Hijri date for local moon sighting.
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl DisplayConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(MIN_TICK_MS))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "miqat").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    /// Write the built-in defaults unless a config file already exists.
    /// Returns whether a file was written.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}
