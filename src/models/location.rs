use crate::config::LocationConfig;

/// Label used when the reverse geocoder gives no city.
pub const UNKNOWN_CITY_LABEL: &str = "موقعك الحالي";
/// Label used when the reverse geocoder gives no country.
pub const UNKNOWN_COUNTRY_LABEL: &str = "غير محدد";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// The configured default city. Carries no coordinates, so schedules for
    /// it are fetched by city name.
    pub fn default_city(config: &LocationConfig) -> Self {
        Self {
            city: config.city_label.clone(),
            country: config.country_label.clone(),
            coordinates: None,
        }
    }

    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}
