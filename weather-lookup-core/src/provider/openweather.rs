use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::{icon::resolve_icon, model::WeatherSnapshot};

use super::{LookupError, LookupOutcome, WeatherLookup};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>) -> Self {
        Self {
            api_key,
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    /// The current-weather GET for `city`, passed through verbatim even when empty.
    pub fn request(&self, city: &str) -> reqwest::Result<reqwest::Request> {
        self.http
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .build()
    }

    async fn fetch_current(&self, city: &str) -> Result<LookupOutcome, LookupError> {
        let req = self.request(city)?;
        let res = self.http.execute(req).await?;

        let status = res.status();
        let body = res.text().await?;

        interpret_response(status, &body)
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherProvider {
    async fn lookup(&self, city: &str) -> Result<LookupOutcome, LookupError> {
        self.fetch_current(city).await
    }
}

/// Classify a current-weather response body.
///
/// OpenWeather reports an unknown city as `{"cod":"404", ...}`; that string is
/// checked before the HTTP status so it wins over the generic status error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<LookupOutcome, LookupError> {
    let parsed = serde_json::from_str::<Value>(body);

    if let Ok(value) = &parsed {
        if value.get("cod").and_then(Value::as_str) == Some("404") {
            return Ok(LookupOutcome::NotFound);
        }
    }

    if !status.is_success() {
        return Err(LookupError::Status {
            status: status.as_u16(),
            body: truncate_body(body),
        });
    }

    let current: OwCurrentResponse = serde_json::from_value(parsed?)?;
    Ok(LookupOutcome::Found(current.into_snapshot()?))
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    dt: Option<i64>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, serde_json::Error> {
        let code = self
            .weather
            .first()
            .map(|w| w.icon.as_str())
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::custom("empty weather list"))?;

        Ok(WeatherSnapshot {
            icon: resolve_icon(code),
            temperature_c: self.main.temp.floor() as i64,
            city: self.name,
            country: self.sys.country,
            latitude: self.coord.lat,
            longitude: self.coord.lon,
            humidity_pct: self.main.humidity,
            wind_speed_kmh: self.wind.speed,
            observation_time: self.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
