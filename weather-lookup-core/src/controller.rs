//! Weather query controller.
//!
//! Owns the search text and the [`ViewState`], runs one lookup per search and
//! publishes every transition on a `watch` channel.
//!
//! Overlapping searches are not sequenced: whichever lookup resolves last
//! decides the final state. Each resolution replaces status and snapshot in a
//! single update, so fields from two different responses never mix.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use crate::{
    model::{QueryState, RequestStatus, ViewState},
    provider::{LookupOutcome, WeatherLookup},
};

/// Message shown for any transport or decoding failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while fetching data.";

#[derive(Debug)]
pub struct WeatherController {
    lookup: Arc<dyn WeatherLookup>,
    query: Mutex<QueryState>,
    view: watch::Sender<ViewState>,
}

impl WeatherController {
    pub fn new(lookup: Arc<dyn WeatherLookup>, query: QueryState) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self {
            lookup,
            query: Mutex::new(query),
            view,
        }
    }

    /// Observe view transitions.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    /// Current view, cloned.
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    pub fn query(&self) -> String {
        self.lock_query().as_str().to_owned()
    }

    /// Record an edit of the search text. Does not search.
    pub fn set_query(&self, text: impl Into<String>) {
        self.lock_query().set(text);
    }

    /// Search for whatever the query currently holds.
    pub async fn search_current(&self) -> RequestStatus {
        let query = self.query();
        self.search(&query).await
    }

    /// Startup trigger: exactly one search for the initial query.
    pub async fn run_startup(&self) -> RequestStatus {
        self.search_current().await
    }

    /// Look up `query` and settle the view. The query is passed through as-is,
    /// including when empty.
    pub async fn search(&self, query: &str) -> RequestStatus {
        tracing::debug!(query, "searching");
        self.view.send_modify(|v| v.status = RequestStatus::Loading);

        let result = self.lookup.lookup(query).await;

        let (status, fresh) = match result {
            Ok(LookupOutcome::Found(snapshot)) => (RequestStatus::Success, Some(snapshot)),
            Ok(LookupOutcome::NotFound) => {
                tracing::info!(query, "city not found");
                (RequestStatus::NotFound, None)
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "weather lookup failed");
                (RequestStatus::Error(GENERIC_ERROR_MESSAGE.to_string()), None)
            }
        };

        self.view.send_modify(|v| {
            if let Some(snapshot) = fresh {
                v.snapshot = Some(snapshot);
            }
            v.status = status.clone();
        });
        status
    }

    fn lock_query(&self) -> MutexGuard<'_, QueryState> {
        // The query is only ever replaced whole.
        self.query.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
