pub mod settings;

pub use settings::{AppConfig, GeoProviderKind, GeolocationConfig, LocationConfig, ServiceConfig};
