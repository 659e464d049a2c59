use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Decode one optional field, turning a value of the wrong type into `None`
/// so a single bad field leaves its siblings intact.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Body of `GET /api/air`. Every field is optional; the backend omits what it
/// could not resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualityResult {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub aqi_label: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(
        default,
        rename = "lastUpdated",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub station_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Meters.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    /// Meters per second.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub wind_deg: Option<f64>,
    /// Cloud cover percentage.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub clouds: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
    /// Observation time, UNIX seconds.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dt: Option<i64>,
    /// Offset from UTC in seconds.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i32>,
}

/// Pollutant concentrations in µg/m³.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pm2_5: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub so2: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub nh3: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub no: Option<f64>,
}

impl AirQualityResult {
    /// Placeholder rendered when the fetch failed or the backend said `ok: false`.
    pub fn unavailable() -> Self {
        Self {
            ok: Some(false),
            ..Self::default()
        }
    }

    /// A missing flag counts as success; only an explicit `false` does not.
    pub fn is_ok(&self) -> bool {
        self.ok.unwrap_or(true)
    }

    pub fn city(&self) -> Option<&str> {
        self.weather
            .as_ref()
            .and_then(|w| w.city.as_deref())
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }

    /// `timestamp` wins over `lastUpdated` when both are sent.
    pub fn updated_at(&self) -> Option<&str> {
        self.timestamp
            .as_deref()
            .or(self.last_updated.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// A decoded `/api/air` response plus the raw JSON it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AirResponse {
    pub result: AirQualityResult,
    pub raw: Option<serde_json::Value>,
}

impl AirResponse {
    pub fn from_json(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let result = serde_json::from_value::<AirQualityResult>(raw.clone())?;
        Ok(Self {
            result,
            raw: Some(raw),
        })
    }

    pub fn unavailable() -> Self {
        Self {
            result: AirQualityResult::unavailable(),
            raw: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
