use crate::category::UsAqiBand;
use crate::geo::GeoPoint;

/// Fixed sample monitoring station shown as a colored circle marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub city: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// US EPA AQI.
    pub aqi: f64,
    pub temp: f64,
    pub wind: &'static str,
}

pub const STATION_SOURCE: &str = "OpenAQ (sample)";

pub const SAMPLE_STATIONS: [Station; 3] = [
    Station {
        city: "Windsor Downtown",
        lat: 42.314,
        lon: -83.04,
        aqi: 55.0,
        temp: 22.0,
        wind: "15 km/h",
    },
    Station {
        city: "West Windsor",
        lat: 42.290,
        lon: -83.08,
        aqi: 120.0,
        temp: 21.0,
        wind: "12 km/h",
    },
    Station {
        city: "Tecumseh",
        lat: 42.320,
        lon: -82.90,
        aqi: 38.0,
        temp: 23.0,
        wind: "10 km/h",
    },
];

impl Station {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    pub fn band(&self) -> UsAqiBand {
        UsAqiBand::from_value(self.aqi)
    }

    /// Popup body, e.g. `Tecumseh<br/>AQI: 38 (Good)`.
    pub fn popup_html(&self) -> String {
        format!(
            "{}<br/>AQI: {} ({})",
            self.city,
            crate::format::format_number(self.aqi, 0),
            self.band().label()
        )
    }
}
