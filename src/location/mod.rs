pub mod geocode;
pub mod geolocation;
pub mod resolver;

pub use geocode::BigDataCloud;
pub use geolocation::{provider_from_config, PositionOptions};
pub use resolver::{LocationNotice, LocationResolver};
