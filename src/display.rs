//! Presentation helpers: condition→glyph/background tables, unit
//! conversion, and clock formatting. All functions are pure and total;
//! absent inputs yield placeholder strings instead of errors.

use chrono::{DateTime, Utc};

use crate::model::Unit;

/// Placeholder for an absent numeric value.
pub const MISSING_VALUE: &str = "--";
/// Placeholder for an absent clock time.
pub const MISSING_TIME: &str = "--:--";
/// Background gradient used while no weather data is loaded at all.
pub const NO_DATA_BACKGROUND: &str = "from-gray-700 to-gray-900";

/// Display glyph for an upstream condition label. Unknown or absent labels
/// fall back to the globe.
pub fn condition_icon(condition: Option<&str>) -> &'static str {
    match condition {
        Some("Clear") => "☀️",
        Some("Clouds") => "☁️",
        Some("Rain") => "🌧️",
        Some("Drizzle") => "🌦️",
        Some("Thunderstorm") => "⛈️",
        Some("Snow") => "❄️",
        Some("Mist" | "Smoke" | "Haze" | "Fog") => "🌫️",
        _ => "🌍",
    }
}

/// Background-gradient token for an upstream condition label.
pub fn condition_background(condition: Option<&str>) -> &'static str {
    match condition {
        Some("Clear") => "from-yellow-300 via-orange-400 to-red-500",
        Some("Clouds") => "from-gray-400 via-gray-500 to-blue-gray-600",
        Some("Rain" | "Drizzle" | "Thunderstorm") => "from-blue-800 via-slate-700 to-gray-900",
        Some("Snow") => "from-sky-300 via-cyan-400 to-blue-500",
        _ => "from-blue-400 to-indigo-600",
    }
}

/// Temperature for display: whole degrees, Celsius under Metric, converted
/// via C*9/5+32 under Imperial.
pub fn convert_temp(celsius: Option<f64>, unit: Unit) -> String {
    let Some(celsius) = celsius else {
        return MISSING_VALUE.to_string();
    };

    let value = match unit {
        Unit::Metric => celsius,
        Unit::Imperial => celsius * 9.0 / 5.0 + 32.0,
    };
    format!("{}", value.round() as i64)
}

/// Wind speed for display with unit suffix, one decimal place.
pub fn convert_speed(mps: Option<f64>, unit: Unit) -> String {
    let Some(mps) = mps else {
        return MISSING_VALUE.to_string();
    };

    match unit {
        Unit::Metric => format!("{mps:.1} m/s"),
        Unit::Imperial => format!("{:.1} mph", mps * 2.237),
    }
}

/// Localized clock string for an epoch plus a UTC offset: the shifted epoch
/// is interpreted as a UTC instant and rendered as hour:minute with
/// meridiem (e.g. "06:41 AM").
pub fn format_time(epoch: Option<i64>, offset_secs: Option<i32>) -> String {
    let (Some(epoch), Some(offset_secs)) = (epoch, offset_secs) else {
        return MISSING_TIME.to_string();
    };

    let Some(shifted) = epoch
        .checked_add(i64::from(offset_secs))
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    else {
        return MISSING_TIME.to_string();
    };

    shifted.format("%I:%M %p").to_string()
}
