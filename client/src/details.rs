use leptos::prelude::*;

use cleansky_shared::format::{
    PLACEHOLDER, compass_for, format_celsius, format_degrees, format_percent, format_pressure,
    format_visibility, format_wind, local_time, or_placeholder, text_or_placeholder,
};
use cleansky_shared::{AirResponse, GeoPoint, Station, Weather};

use crate::app::{DetailsContent, DetailsOpen, toggle_panel};
use crate::controller::Panel;

/// Extended weather breakdown shown in the details modal.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub station_id: String,
    pub station_name: String,
    pub coordinates: String,
    pub country: String,
    pub temperature: String,
    pub feels_like: String,
    pub min_max: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub clouds: String,
    pub description: String,
    pub sunrise: String,
    pub sunset: String,
    pub observed: String,
    pub raw_json: String,
}

impl Default for DetailsView {
    fn default() -> Self {
        Self::unavailable()
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

fn clock(unix: Option<i64>, weather: &Weather) -> String {
    or_placeholder(
        unix.and_then(|secs| local_time(secs, weather.timezone)),
        |time| time,
    )
}

fn coordinates(lat: Option<f64>, lon: Option<f64>) -> String {
    match (lat, lon) {
        (Some(lat), Some(lon)) => format!("{}, {}", format_degrees(lat), format_degrees(lon)),
        _ => placeholder(),
    }
}

fn min_max(min: Option<f64>, max: Option<f64>) -> String {
    if min.is_none() && max.is_none() {
        return placeholder();
    }
    format!(
        "{} / {}",
        or_placeholder(min, format_celsius),
        or_placeholder(max, format_celsius)
    )
}

impl DetailsView {
    pub fn unavailable() -> Self {
        Self {
            station_id: placeholder(),
            station_name: placeholder(),
            coordinates: placeholder(),
            country: placeholder(),
            temperature: placeholder(),
            feels_like: placeholder(),
            min_max: placeholder(),
            humidity: placeholder(),
            pressure: placeholder(),
            visibility: placeholder(),
            wind_speed: placeholder(),
            wind_direction: placeholder(),
            clouds: placeholder(),
            description: placeholder(),
            sunrise: placeholder(),
            sunset: placeholder(),
            observed: placeholder(),
            raw_json: placeholder(),
        }
    }

    /// Coordinates come from the payload and fall back to the queried point.
    pub fn from_response(response: &AirResponse, queried: GeoPoint) -> Self {
        if !response.is_ok() {
            return Self::unavailable();
        }

        let empty = Weather::default();
        let weather = response.result.weather.as_ref().unwrap_or(&empty);

        Self {
            station_id: or_placeholder(weather.station_id, |id| id.to_string()),
            station_name: text_or_placeholder(weather.station_name.as_deref()),
            coordinates: coordinates(
                weather.lat.or(Some(queried.lat)),
                weather.lon.or(Some(queried.lon)),
            ),
            country: text_or_placeholder(weather.country.as_deref()),
            temperature: or_placeholder(weather.temp, format_celsius),
            feels_like: or_placeholder(weather.feels_like, format_celsius),
            min_max: min_max(weather.temp_min, weather.temp_max),
            humidity: or_placeholder(weather.humidity, format_percent),
            pressure: or_placeholder(weather.pressure, format_pressure),
            visibility: or_placeholder(weather.visibility, format_visibility),
            wind_speed: or_placeholder(weather.wind_speed, format_wind),
            wind_direction: compass_for(weather.wind_deg).to_string(),
            clouds: or_placeholder(weather.clouds, format_percent),
            description: text_or_placeholder(weather.description.as_deref()),
            sunrise: clock(weather.sunrise, weather),
            sunset: clock(weather.sunset, weather),
            observed: clock(weather.dt, weather),
            raw_json: or_placeholder(
                response
                    .raw
                    .as_ref()
                    .and_then(|raw| serde_json::to_string_pretty(raw).ok()),
                |json| json,
            ),
        }
    }

    pub fn from_station(station: &Station) -> Self {
        Self {
            station_name: station.city.to_string(),
            coordinates: coordinates(Some(station.lat), Some(station.lon)),
            temperature: format_celsius(station.temp),
            wind_speed: station.wind.to_string(),
            ..Self::unavailable()
        }
    }
}

#[component]
pub fn DetailsModal() -> impl IntoView {
    let DetailsContent(content) = expect_context();
    let DetailsOpen(open) = expect_context();

    let field = move |pick: fn(&DetailsView) -> String| Signal::derive(move || content.with(pick));

    view! {
        <div
            class="modal-backdrop"
            class:open=move || open.get()
            on:click=move |_| toggle_panel(Panel::Details, false)
        >
            <section
                class="modal"
                role="dialog"
                aria-modal="true"
                on:click=move |e| e.stop_propagation()
            >
                <header style="display: flex; align-items: center; justify-content: space-between; padding: 16px 20px; border-bottom: 1px solid #e2e8f0;">
                    <h3 style="margin: 0; font-size: 1.05rem; color: #0f172a;">"Weather details"</h3>
                    <button
                        class="icon-button"
                        title="Close"
                        on:click=move |_| toggle_panel(Panel::Details, false)
                    >
                        "\u{00D7}"
                    </button>
                </header>
                <dl class="metric-grid" style="padding: 16px 20px;">
                    <DetailRow label="Station ID" value=field(|c| c.station_id.clone()) />
                    <DetailRow label="Station" value=field(|c| c.station_name.clone()) />
                    <DetailRow label="Coordinates" value=field(|c| c.coordinates.clone()) />
                    <DetailRow label="Country" value=field(|c| c.country.clone()) />
                    <DetailRow label="Temperature" value=field(|c| c.temperature.clone()) />
                    <DetailRow label="Feels like" value=field(|c| c.feels_like.clone()) />
                    <DetailRow label="Min / Max" value=field(|c| c.min_max.clone()) />
                    <DetailRow label="Humidity" value=field(|c| c.humidity.clone()) />
                    <DetailRow label="Pressure" value=field(|c| c.pressure.clone()) />
                    <DetailRow label="Visibility" value=field(|c| c.visibility.clone()) />
                    <DetailRow label="Wind" value=field(|c| c.wind_speed.clone()) />
                    <DetailRow label="Direction" value=field(|c| c.wind_direction.clone()) />
                    <DetailRow label="Clouds" value=field(|c| c.clouds.clone()) />
                    <DetailRow label="Conditions" value=field(|c| c.description.clone()) />
                    <DetailRow label="Sunrise" value=field(|c| c.sunrise.clone()) />
                    <DetailRow label="Sunset" value=field(|c| c.sunset.clone()) />
                    <DetailRow label="Observed" value=field(|c| c.observed.clone()) />
                </dl>
                <details style="padding: 0 20px 16px;">
                    <summary style="cursor: pointer; font-size: 0.8rem; color: #64748b;">"Raw response"</summary>
                    <pre class="raw-json">{move || content.with(|c| c.raw_json.clone())}</pre>
                </details>
            </section>
        </div>
    }
}

#[component]
fn DetailRow(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <dt style="font-size: 0.78rem; color: #64748b;">{label}</dt>
        <dd style="margin: 0; font-size: 0.9rem; color: #0f172a;">{move || value.get()}</dd>
    }
}
