use super::{ServiceCore, WeatherService};
use crate::api_client::WeatherFetcher;
use crate::cache::WeatherCache;
use crate::settings::{PollingSettings, Settings};
use common::errors::AppError;
use common::models::WeatherResponse;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Serves requests like the on-demand mode and additionally refreshes every
/// cached location in the background on a fixed schedule.
///
/// Construction fails outside a Tokio runtime. Ticks run serially; a tick that
/// fails with anything other than a fetch error shuts the whole service down.
pub struct PollingWeatherService<F> {
    core: Arc<ServiceCore<F>>,
    cancel: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<F: WeatherFetcher> PollingWeatherService<F> {
    pub fn new(fetcher: F, settings: &Settings) -> Result<Self, AppError> {
        settings.validate()?;
        let runtime = Handle::try_current().map_err(|e| {
            AppError::internal(format!("polling requires a Tokio runtime: {}", e))
        })?;

        let core = Arc::new(ServiceCore::new(fetcher, settings));
        let cancel = CancellationToken::new();
        let worker = runtime.spawn(poll_loop(
            core.clone(),
            cancel.clone(),
            settings.polling.clone(),
        ));

        info!(
            initial_delay_ms = settings.polling.initial_delay.as_millis(),
            period_ms = settings.polling.period.as_millis(),
            "Polling started"
        );

        Ok(Self {
            core,
            cancel,
            worker: Mutex::new(Some(worker)),
        })
    }

    pub fn cache(&self) -> &WeatherCache<WeatherResponse> {
        self.core.cache()
    }
}

impl<F: WeatherFetcher> WeatherService for PollingWeatherService<F> {
    #[instrument(skip(self), fields(mode = "polling"))]
    async fn get_weather(&self, location: &str) -> Result<WeatherResponse, AppError> {
        self.core.get_weather(location).await
    }

    async fn shutdown(&self) {
        self.cancel.cancel();
        self.core.shutdown().await;

        let worker = self.worker.lock().map(|mut w| w.take()).unwrap_or_default();
        if let Some(worker) = worker
            && let Err(e) = worker.await
        {
            warn!(error = %e, "Polling worker ended abnormally");
        }
    }

    fn is_active(&self) -> bool {
        self.core.is_active()
    }
}

impl<F> Drop for PollingWeatherService<F> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop<F: WeatherFetcher>(
    core: Arc<ServiceCore<F>>,
    cancel: CancellationToken,
    polling: PollingSettings,
) {
    let mut interval = interval_at(Instant::now() + polling.initial_delay, polling.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        if !core.is_active() {
            break;
        }

        // run the tick as its own task so a panic surfaces as a JoinError
        let mut tick = tokio::spawn(refresh_cached_locations(core.clone()));

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            outcome = &mut tick => Some(outcome),
        };

        // wait for an aborted tick to unwind so nothing runs once shutdown returns
        let Some(outcome) = outcome else {
            tick.abort();
            let _ = tick.await;
            break;
        };

        let failure = match outcome {
            Ok(Ok(refreshed)) => {
                debug!(refreshed, "Polling tick completed");
                continue;
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };

        error!(error = %failure, "Critical polling error, shutting down service");
        cancel.cancel();
        core.shutdown().await;
        break;
    }

    debug!("Polling loop exited");
}

/// One tick: refetch every cached location. Fetch failures are logged per location;
/// any other error aborts the tick and is returned to the loop.
async fn refresh_cached_locations<F: WeatherFetcher>(
    core: Arc<ServiceCore<F>>,
) -> Result<usize, AppError> {
    let locations = core.cache().keys().await;
    let mut refreshed = 0;

    for location in locations {
        if !core.is_active() {
            break;
        }

        match core.refresh(&location).await {
            Ok(true) => refreshed += 1,
            Ok(false) => {}
            Err(e) if e.is_fetch_failure() => {
                error!(
                    location = %location,
                    status = ?e.status_code(),
                    error = %e,
                    "Failed to update location"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(refreshed)
}
