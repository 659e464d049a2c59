use leptos::prelude::*;

use cleansky_shared::format::{
    PLACEHOLDER, escape_html, format_celsius, format_concentration, format_number, format_wind,
    or_placeholder, text_or_placeholder, updated_label,
};
use cleansky_shared::{AirQualityResult, NEUTRAL_COLOR, STATION_SOURCE, Station, category_for};

use crate::app::{DetailsOpen, SidebarContent, SidebarOpen, toggle_panel};
use crate::controller::Panel;

/// Text and colors shown in the sidebar for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarView {
    pub title: String,
    pub aqi_value: String,
    pub aqi_label: String,
    pub badge_color: &'static str,
    pub advisory: &'static str,
    pub temperature: String,
    pub wind: String,
    pub pm2_5: String,
    pub pm10: String,
    pub source: String,
    pub updated: String,
}

impl Default for SidebarView {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl SidebarView {
    pub fn unavailable() -> Self {
        Self {
            title: PLACEHOLDER.to_string(),
            aqi_value: PLACEHOLDER.to_string(),
            aqi_label: PLACEHOLDER.to_string(),
            badge_color: NEUTRAL_COLOR,
            advisory: "",
            temperature: PLACEHOLDER.to_string(),
            wind: PLACEHOLDER.to_string(),
            pm2_5: PLACEHOLDER.to_string(),
            pm10: PLACEHOLDER.to_string(),
            source: PLACEHOLDER.to_string(),
            updated: PLACEHOLDER.to_string(),
        }
    }

    /// `title` is the already-resolved place name. `now_label` is used when the
    /// result carries no timestamp of its own.
    pub fn from_result(result: &AirQualityResult, title: Option<&str>, now_label: &str) -> Self {
        if !result.is_ok() {
            return Self::unavailable();
        }

        let style = category_for(result.aqi_label.as_deref());
        let weather = result.weather.as_ref();
        let components = result.components.as_ref();

        Self {
            title: text_or_placeholder(title),
            aqi_value: or_placeholder(result.aqi, |v| format_number(v, 0)),
            aqi_label: text_or_placeholder(result.aqi_label.as_deref()),
            badge_color: style.color,
            advisory: style.advisory,
            temperature: or_placeholder(weather.and_then(|w| w.temp), format_celsius),
            wind: or_placeholder(weather.and_then(|w| w.wind_speed), format_wind),
            pm2_5: or_placeholder(components.and_then(|c| c.pm2_5), format_concentration),
            pm10: or_placeholder(components.and_then(|c| c.pm10), format_concentration),
            source: text_or_placeholder(result.source.as_deref()),
            updated: result
                .updated_at()
                .map(updated_label)
                .unwrap_or_else(|| now_label.to_string()),
        }
    }

    pub fn from_station(station: &Station, now_label: &str) -> Self {
        let band = station.band();
        Self {
            title: station.city.to_string(),
            aqi_value: format_number(station.aqi, 0),
            aqi_label: band.label().to_string(),
            badge_color: band.color(),
            advisory: band.advisory(),
            temperature: format_celsius(station.temp),
            wind: station.wind.to_string(),
            pm2_5: PLACEHOLDER.to_string(),
            pm10: PLACEHOLDER.to_string(),
            source: STATION_SOURCE.to_string(),
            updated: now_label.to_string(),
        }
    }

    /// Popup bound to the current-location marker.
    pub fn popup_html(&self) -> String {
        format!(
            "{}<br/>AQI: {} ({})",
            escape_html(&self.title),
            escape_html(&self.aqi_value),
            escape_html(&self.aqi_label)
        )
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let SidebarContent(content) = expect_context();
    let SidebarOpen(open) = expect_context();
    let DetailsOpen(details_open) = expect_context();

    let field = move |pick: fn(&SidebarView) -> String| Signal::derive(move || content.with(pick));

    view! {
        <aside
            class="sidebar"
            class:open=move || open.get()
            aria-hidden=move || if open.get() { "false" } else { "true" }
        >
            <div style="display: flex; align-items: flex-start; justify-content: space-between; gap: 12px; padding: 20px 24px 12px; border-bottom: 1px solid #e2e8f0;">
                <h2 style="margin: 0; font-size: 1.25rem; font-weight: 700; color: #0f172a;">
                    {move || content.with(|c| c.title.clone())}
                </h2>
                <button
                    class="icon-button"
                    title="Close"
                    on:click=move |_| toggle_panel(Panel::Sidebar, false)
                >
                    "\u{00D7}"
                </button>
            </div>
            <div style="padding: 16px 24px; display: flex; flex-direction: column; gap: 14px;">
                <div
                    class="aqi-badge"
                    style:background=move || content.with(|c| c.badge_color)
                >
                    <div style="font-size: 2.25rem; font-weight: 800; line-height: 1;">
                        {move || content.with(|c| c.aqi_value.clone())}
                    </div>
                    <div style="font-size: 0.9rem; font-weight: 600;">
                        {move || content.with(|c| c.aqi_label.clone())}
                    </div>
                </div>
                <p style="margin: 0; font-size: 0.88rem; color: #334155; min-height: 1.2em;">
                    {move || content.with(|c| c.advisory)}
                </p>
                <dl class="metric-grid">
                    <SidebarRow label="Temperature" value=field(|c| c.temperature.clone()) />
                    <SidebarRow label="Wind" value=field(|c| c.wind.clone()) />
                    <SidebarRow label="PM2.5" value=field(|c| c.pm2_5.clone()) />
                    <SidebarRow label="PM10" value=field(|c| c.pm10.clone()) />
                    <SidebarRow label="Source" value=field(|c| c.source.clone()) />
                </dl>
                <div style="font-size: 0.75rem; color: #64748b;">
                    {move || content.with(|c| c.updated.clone())}
                </div>
                <button
                    class="primary-button"
                    on:click=move |_| toggle_panel(Panel::Details, !details_open.get_untracked())
                >
                    "Details"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn SidebarRow(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <dt style="font-size: 0.78rem; color: #64748b;">{label}</dt>
        <dd style="margin: 0; font-size: 0.9rem; color: #0f172a; font-variant-numeric: tabular-nums;">
            {move || value.get()}
        </dd>
    }
}
