use serde::Deserialize;

/// Reverse-geocoding service used when the air payload has no city.
pub const REVERSE_GEOCODE_BASE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Full request URL for a point, zoomed to city level.
pub fn reverse_geocode_url(lat: f64, lon: f64) -> String {
    format!("{REVERSE_GEOCODE_BASE_URL}?format=json&lat={lat}&lon={lon}&zoom=10&addressdetails=1")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseGeocode {
    #[serde(default)]
    pub address: Option<ReverseAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub hamlet: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
}

impl ReverseGeocode {
    /// Most specific settlement name in the address, if any.
    pub fn place_name(&self) -> Option<String> {
        let address = self.address.as_ref()?;
        [
            &address.city,
            &address.town,
            &address.village,
            &address.hamlet,
            &address.municipality,
            &address.county,
        ]
        .into_iter()
        .flatten()
        .map(|name| name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
    }
}
