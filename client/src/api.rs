use std::future::Future;

use cleansky_shared::reverse::{ReverseGeocode, reverse_geocode_url};
use cleansky_shared::{AirResponse, GeoPoint};

use crate::config::air_url;
use crate::controller::AirApi;

/// `fetch`-backed client for `/api/air` and the reverse geocoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpAirApi;

/// Fetch air quality and weather for a point from the local backend.
pub async fn fetch_air(point: GeoPoint) -> Result<AirResponse, String> {
    let resp = gloo_net::http::Request::get(&air_url(point.lat, point.lon))
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let raw = resp
        .json::<serde_json::Value>()
        .await
        .map_err(|e| format!("parse error: {e}"))?;

    AirResponse::from_json(raw).map_err(|e| format!("parse error: {e}"))
}

/// Look up a settlement name for a point. `Ok(None)` when the geocoder knows
/// the area but has no settlement for it.
pub async fn reverse_place(point: GeoPoint) -> Result<Option<String>, String> {
    let resp = gloo_net::http::Request::get(&reverse_geocode_url(point.lat, point.lon))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<ReverseGeocode>()
        .await
        .map(|geocode| geocode.place_name())
        .map_err(|e| format!("parse error: {e}"))
}

impl AirApi for HttpAirApi {
    fn fetch_air(&self, point: GeoPoint) -> impl Future<Output = Result<AirResponse, String>> {
        fetch_air(point)
    }

    fn reverse_place(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<Option<String>, String>> {
        reverse_place(point)
    }
}
