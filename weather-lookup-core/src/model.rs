use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::icon::WeatherIcon;

/// City looked up at startup when nothing else is configured.
pub const DEFAULT_CITY: &str = "Coimbatore";

/// Text currently entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    query: String,
}

impl QueryState {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into() }
    }

    /// Replace the query with the latest edit. No trimming or validation.
    pub fn set(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}

/// Weather fields from one successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub icon: WeatherIcon,
    pub temperature_c: i64,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub humidity_pct: u8,
    /// `wind.speed` exactly as the service reports it; displayed with a km/h label.
    pub wind_speed_kmh: f64,
    pub observation_time: Option<DateTime<Utc>>,
}

/// Outcome of the most recent search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    NotFound,
    Error(String),
    Success,
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }
}

/// Everything the presenter needs: the status and the last good snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub status: RequestStatus,
    pub snapshot: Option<WeatherSnapshot>,
}

impl ViewState {
    /// The snapshot, but only while it is valid for display.
    pub fn visible_snapshot(&self) -> Option<&WeatherSnapshot> {
        match self.status {
            RequestStatus::Success => self.snapshot.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            icon: WeatherIcon::Cloudy,
            temperature_c: 27,
            city: "Coimbatore".into(),
            country: "IN".into(),
            latitude: 11.0,
            longitude: 76.9667,
            humidity_pct: 70,
            wind_speed_kmh: 14.4,
            observation_time: None,
        }
    }

    #[test]
    fn query_defaults_to_coimbatore() {
        assert_eq!(QueryState::default().as_str(), "Coimbatore");
    }

    #[test]
    fn query_set_keeps_text_verbatim() {
        let mut q = QueryState::default();
        q.set("  ");
        assert_eq!(q.as_str(), "  ");
    }

    #[test]
    fn snapshot_hidden_unless_success() {
        let mut view = ViewState {
            status: RequestStatus::Success,
            snapshot: Some(snapshot()),
        };
        assert!(view.visible_snapshot().is_some());

        for status in [
            RequestStatus::Idle,
            RequestStatus::Loading,
            RequestStatus::NotFound,
            RequestStatus::Error("boom".into()),
        ] {
            view.status = status;
            assert!(view.visible_snapshot().is_none());
        }
    }
}
