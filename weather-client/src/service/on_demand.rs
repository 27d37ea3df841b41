use super::{ServiceCore, WeatherService};
use crate::api_client::WeatherFetcher;
use crate::cache::WeatherCache;
use crate::settings::Settings;
use common::errors::AppError;
use common::models::WeatherResponse;
use tracing::instrument;

/// Fetches weather only when a caller asks for a location that is missing or stale.
pub struct OnDemandWeatherService<F> {
    core: ServiceCore<F>,
}

impl<F: WeatherFetcher> OnDemandWeatherService<F> {
    pub fn new(fetcher: F, settings: &Settings) -> Result<Self, AppError> {
        settings.validate()?;
        Ok(Self {
            core: ServiceCore::new(fetcher, settings),
        })
    }

    pub fn cache(&self) -> &WeatherCache<WeatherResponse> {
        self.core.cache()
    }
}

impl<F: WeatherFetcher> WeatherService for OnDemandWeatherService<F> {
    #[instrument(skip(self), fields(mode = "on_demand"))]
    async fn get_weather(&self, location: &str) -> Result<WeatherResponse, AppError> {
        self.core.get_weather(location).await
    }

    async fn shutdown(&self) {
        self.core.shutdown().await;
    }

    fn is_active(&self) -> bool {
        self.core.is_active()
    }
}
