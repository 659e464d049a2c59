
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Text shown for any value that is missing.
pub const PLACEHOLDER: &str = "—";

/// Format `value` or fall back to [`PLACEHOLDER`].
pub fn or_placeholder<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    match value {
        Some(value) => format(value),
        None => PLACEHOLDER.to_string(),
    }
}

/// Placeholder-aware text for optional strings; blank strings count as missing.
pub fn text_or_placeholder(value: Option<&str>) -> String {
    or_placeholder(value.map(str::trim).filter(|s| !s.is_empty()), str::to_string)
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Nearest of the 16 compass points for a bearing in degrees.
pub fn compass_for(deg: Option<f64>) -> &'static str {
    let Some(deg) = deg.filter(|d| d.is_finite()) else {
        return PLACEHOLDER;
    };
    let sector = (deg / 22.5).round() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

/// Trim trailing zeros so `21.0` prints as `21`.
pub fn format_number(value: f64, max_decimals: usize) -> String {
    let mut out = format!("{value:.max_decimals$}");
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.');
        out.truncate(trimmed.len());
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}

pub fn format_celsius(value: f64) -> String {
    format!("{}°C", format_number(value, 1))
}

pub fn format_wind(meters_per_sec: f64) -> String {
    format!("{} m/s", format_number(meters_per_sec, 1))
}

pub fn format_concentration(ug_m3: f64) -> String {
    format!("{} µg/m³", format_number(ug_m3, 1))
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value, 0))
}

pub fn format_pressure(hpa: f64) -> String {
    format!("{} hPa", format_number(hpa, 0))
}

/// Visibility in meters, shown in km once it reaches one kilometer.
pub fn format_visibility(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{} km", format_number(meters / 1000.0, 1))
    } else {
        format!("{} m", format_number(meters, 0))
    }
}

pub fn format_degrees(value: f64) -> String {
    format!("{}°", format_number(value, 4))
}

/// Local wall-clock `HH:MM` for a UNIX timestamp and a UTC offset in seconds.
/// Out-of-range offsets fall back to UTC.
pub fn local_time(unix_secs: i64, offset_secs: Option<i32>) -> Option<String> {
    let utc = DateTime::<Utc>::from_timestamp(unix_secs, 0)?;
    let offset = offset_secs
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    Some(utc.with_timezone(&offset).format("%H:%M").to_string())
}

/// Escape text before it is placed into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `Updated: …` line. Timestamps that parse as RFC 3339 are shown as local
/// `HH:MM:SS` in their own offset; anything else is shown verbatim.
pub fn updated_label(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp.trim()) {
        Ok(dt) => format!("Updated: {}", dt.format("%H:%M:%S")),
        Err(_) => format!("Updated: {}", timestamp.trim()),
    }
}
