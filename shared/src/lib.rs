pub mod air;
pub mod category;
pub mod format;
pub mod geo;
pub mod reverse;
pub mod station;

pub use air::{AirQualityResult, AirResponse, Components, Weather};
pub use category::{AqiCategory, CategoryStyle, NEUTRAL_COLOR, UsAqiBand, category_for};
pub use format::{PLACEHOLDER, compass_for, or_placeholder};
pub use geo::{CANADA_BOUNDS, Clamped, GeoBounds, GeoPoint, ViewState};
pub use station::{SAMPLE_STATIONS, STATION_SOURCE, Station};
