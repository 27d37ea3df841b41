//! Weather services: a shared fetch-or-cache core and the two modes built on it.

mod on_demand;
mod polling;

pub use on_demand::OnDemandWeatherService;
pub use polling::PollingWeatherService;

use crate::api_client::WeatherFetcher;
use crate::cache::WeatherCache;
use crate::freshness::is_fresh;
use crate::settings::Settings;
use common::errors::AppError;
use common::models::WeatherResponse;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Capability shared by every service mode.
pub trait WeatherService {
    /// Returns cached weather for `location` while it is fresh, otherwise fetches
    /// and caches it. Fails with [`AppError::ServiceShutDown`] once shut down.
    fn get_weather(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<WeatherResponse, AppError>> + Send;

    /// Rejects all further requests and drops every cached entry.
    fn shutdown(&self) -> impl Future<Output = ()> + Send;

    fn is_active(&self) -> bool;
}

/// State owned by one service instance.
pub(crate) struct ServiceCore<F> {
    active: AtomicBool,
    data_freshness_minutes: u64,
    cache: WeatherCache<WeatherResponse>,
    fetcher: F,
}

impl<F: WeatherFetcher> ServiceCore<F> {
    pub(crate) fn new(fetcher: F, settings: &Settings) -> Self {
        Self {
            active: AtomicBool::new(true),
            data_freshness_minutes: settings.data_freshness_minutes,
            cache: WeatherCache::with_capacity(settings.cache.size),
            fetcher,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn cache(&self) -> &WeatherCache<WeatherResponse> {
        &self.cache
    }

    fn is_fresh(&self, weather: &WeatherResponse) -> bool {
        is_fresh(weather.dt, self.data_freshness_minutes)
    }

    pub(crate) async fn get_weather(&self, location: &str) -> Result<WeatherResponse, AppError> {
        if !self.is_active() {
            return Err(AppError::ServiceShutDown);
        }

        if let Some(cached) = self.cache.get(location).await
            && self.is_fresh(&cached)
        {
            debug!(location = %location, "Cache hit");
            return Ok(cached);
        }

        debug!(location = %location, "Cache miss or stale entry");
        let weather = self.fetcher.fetch(location).await?;

        // a request racing shutdown still gets its answer, but the cache stays empty
        if self.is_active() {
            self.cache.put(location, weather.clone()).await;
        }

        Ok(weather)
    }

    /// Fetches `location` once and stores the result only when the entry cached
    /// before the fetch was missing or stale. Returns whether the cache was updated.
    pub(crate) async fn refresh(&self, location: &str) -> Result<bool, AppError> {
        let cached = self.cache.get(location).await;
        let fetched = self.fetcher.fetch(location).await?;

        let should_store = match &cached {
            None => true,
            Some(previous) => !self.is_fresh(previous),
        };

        if should_store && self.is_active() {
            self.cache.put(location, fetched).await;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) async fn shutdown(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            info!("Weather service shutting down");
        }
        self.cache.clear().await;
    }
}
