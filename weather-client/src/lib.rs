//! Cached access to current weather from the OpenWeather API.
//!
//! Two service modes share one contract ([`WeatherService`]): [`ApiMode::OnDemand`]
//! fetches only when a cached entry is missing or stale, while [`ApiMode::Polling`]
//! also refreshes every cached location in the background.

pub mod api_client;
pub mod cache;
pub mod config;
pub mod freshness;
pub mod mode;
pub mod registry;
pub mod service;
pub mod settings;

pub use api_client::{OpenWeatherClient, WeatherFetcher};
pub use cache::{Observed, WeatherCache};
pub use mode::{AnyWeatherService, ApiMode};
pub use registry::WeatherServiceRegistry;
pub use service::{OnDemandWeatherService, PollingWeatherService, WeatherService};
pub use settings::Settings;
