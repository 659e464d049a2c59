use std::ops::RangeInclusive;

use axum::Json;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::state::AppState;

const LAT_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LON_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Query string of `/api/air`. Kept as text so malformed numbers get the
/// same JSON error body as out-of-range ones.
#[derive(Debug, Default, Deserialize)]
pub struct AirQuery {
    lat: Option<String>,
    lon: Option<String>,
}

/// Relay an air-quality lookup to the configured upstream.
///
/// The upstream body is passed through untouched when it is JSON. Every
/// failure answers with `{"ok": false, "error": ...}` so the client can render
/// its placeholder state from the body alone.
pub async fn get_air(State(state): State<AppState>, Query(query): Query<AirQuery>) -> Response {
    state.observability.record_air_request();

    let (lat, lon) = match parse_coordinates(&query) {
        Ok(coordinates) => coordinates,
        Err(message) => {
            state.observability.record_air_rejected();
            return air_error(StatusCode::BAD_REQUEST, message);
        }
    };

    let Some(upstream) = state.air_upstream.as_deref() else {
        return air_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "air quality upstream is not configured".to_owned(),
        );
    };

    match fetch_upstream(&state.http_client, upstream, lat, lon).await {
        Ok(body) => {
            debug!(lat, lon, bytes = body.len(), "relayed air quality payload");
            json_bytes_response(body)
        }
        Err(message) => {
            state.observability.record_air_upstream_error();
            warn!(lat, lon, error = %message, "air quality upstream failed");
            air_error(StatusCode::BAD_GATEWAY, message)
        }
    }
}

fn parse_coordinates(query: &AirQuery) -> Result<(f64, f64), String> {
    let lat = parse_coordinate("lat", query.lat.as_deref(), &LAT_RANGE)?;
    let lon = parse_coordinate("lon", query.lon.as_deref(), &LON_RANGE)?;
    Ok((lat, lon))
}

fn parse_coordinate(
    name: &str,
    raw: Option<&str>,
    range: &RangeInclusive<f64>,
) -> Result<f64, String> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("missing {name}"))?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("{name} is not a number"))?;
    // NaN fails the range check too.
    if !range.contains(&value) {
        return Err(format!(
            "{name} must be within [{}, {}]",
            range.start(),
            range.end()
        ));
    }
    Ok(value)
}

async fn fetch_upstream(
    client: &reqwest::Client,
    upstream: &str,
    lat: f64,
    lon: f64,
) -> Result<Bytes, String> {
    let url = reqwest::Url::parse(upstream).map_err(|e| format!("invalid upstream URL: {e}"))?;
    let resp = client
        .get(url)
        .query(&[("lat", lat), ("lon", lon)])
        .send()
        .await
        .map_err(|e| format!("upstream request failed: {e}"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(format!("upstream returned HTTP {}", status.as_u16()));
    }

    let body = resp
        .bytes()
        .await
        .map_err(|e| format!("upstream body unreadable: {e}"))?;
    serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(|e| format!("upstream returned invalid JSON: {e}"))?;
    Ok(body)
}

fn json_bytes_response(body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn air_error(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({ "ok": false, "error": message })),
    )
        .into_response()
}
