/// Quiet period after the last map click before a load is dispatched.
pub const CLICK_DEBOUNCE_MS: u32 = 200;

/// Must match the `.sidebar` transform transition in `index.html`.
pub const SIDEBAR_TRANSITION_MS: u32 = 300;

pub const AIR_ENDPOINT: &str = "/api/air";

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const TILE_MAX_ZOOM: f64 = 19.0;

/// Element the Leaflet map is created in.
pub const MAP_ELEMENT_ID: &str = "map";

pub fn air_url(lat: f64, lon: f64) -> String {
    format!("{AIR_ENDPOINT}?lat={lat}&lon={lon}")
}
