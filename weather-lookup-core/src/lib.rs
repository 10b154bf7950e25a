//! Core library for the `weather-lookup` widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather lookup collaborator
//! - The query controller and its view state
//! - A plain-text presenter for the display region
//!
//! It is used by `weather-lookup-cli`, but can also back other front ends.

pub mod config;
pub mod controller;
pub mod icon;
pub mod model;
pub mod present;
pub mod provider;

pub use config::Config;
pub use controller::WeatherController;
pub use icon::{WeatherIcon, resolve_icon};
pub use model::{QueryState, RequestStatus, ViewState, WeatherSnapshot};
pub use provider::{LookupError, LookupOutcome, WeatherLookup};
