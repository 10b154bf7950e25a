//! Weather display presenter: view state in, text out.

use crate::model::{RequestStatus, ViewState, WeatherSnapshot};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const NOT_FOUND_MESSAGE: &str = "City not found";

/// Render the display region. Exactly one of loading, error, not-found or the
/// weather block is produced; `Idle` renders nothing.
pub fn render_view(view: &ViewState) -> String {
    match &view.status {
        RequestStatus::Idle => String::new(),
        RequestStatus::Loading => LOADING_MESSAGE.to_string(),
        RequestStatus::Error(msg) => msg.clone(),
        RequestStatus::NotFound => NOT_FOUND_MESSAGE.to_string(),
        RequestStatus::Success => view.visible_snapshot().map(render_snapshot).unwrap_or_default(),
    }
}

pub fn render_snapshot(s: &WeatherSnapshot) -> String {
    let mut out = format!(
        "{glyph}  ({asset})\n\
         {temp}°C\n\
         {city}\n\
         {country}\n\
         Latitude   {lat}\n\
         Longitude  {lon}\n\
         {humidity}%  Humidity\n\
         {wind} km/h  Wind Speed",
        glyph = s.icon.glyph(),
        asset = s.icon.asset(),
        temp = s.temperature_c,
        city = s.city,
        country = s.country,
        lat = s.latitude,
        lon = s.longitude,
        humidity = s.humidity_pct,
        wind = s.wind_speed_kmh,
    );

    if let Some(at) = s.observation_time {
        out.push_str(&format!("\nObserved {}", at.format("%Y-%m-%d %H:%M UTC")));
    }

    out
}
