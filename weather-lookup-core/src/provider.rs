use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, model::WeatherSnapshot, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// What a lookup can legitimately answer.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(WeatherSnapshot),
    NotFound,
}

/// Anything that prevented a usable answer.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request to weather service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected weather service response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn lookup(&self, city: &str) -> Result<LookupOutcome, LookupError>;
}

/// Construct the OpenWeather client from config.
pub fn openweather_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.require_api_key()?.to_owned();

    Ok(match config.endpoint.as_deref() {
        Some(url) => OpenWeatherProvider::with_endpoint(api_key, url),
        None => OpenWeatherProvider::new(api_key),
    })
}

/// Construct the lookup used by front ends.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherLookup>> {
    Ok(Box::new(openweather_from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            ..Default::default()
        };

        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn config_without_endpoint_uses_default() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            ..Default::default()
        };

        let req = openweather_from_config(&cfg).unwrap().request("Salem").unwrap();
        assert!(req.url().as_str().starts_with(openweather::DEFAULT_ENDPOINT));
    }

    #[test]
    fn config_endpoint_override_is_used() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            endpoint: Some("http://127.0.0.1:9000/current".into()),
            ..Default::default()
        };

        let req = openweather_from_config(&cfg).unwrap().request("Salem").unwrap();
        assert!(req.url().as_str().starts_with("http://127.0.0.1:9000/current?q=Salem"));
    }

    #[test]
    fn status_error_message_carries_code() {
        let err = LookupError::Status { status: 401, body: "Invalid API key".into() };
        assert_eq!(err.to_string(), "weather service responded with status 401: Invalid API key");
    }
}
