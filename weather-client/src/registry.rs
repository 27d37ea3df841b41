use crate::api_client::WeatherFetcher;
use crate::mode::{AnyWeatherService, ApiMode};
use crate::service::WeatherService;
use crate::settings::Settings;
use common::errors::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Weather services keyed by API key, owned by whoever creates the registry.
///
/// `make_fetcher` binds an API key to the fetcher the new service will use.
pub struct WeatherServiceRegistry<F, M> {
    services: HashMap<String, Arc<AnyWeatherService<F>>>,
    make_fetcher: M,
}

impl<F, M> WeatherServiceRegistry<F, M>
where
    F: WeatherFetcher,
    M: Fn(&str) -> F,
{
    pub fn new(make_fetcher: M) -> Self {
        Self {
            services: HashMap::new(),
            make_fetcher,
        }
    }

    /// Creates a service with default settings.
    pub fn create_default(
        &mut self,
        api_key: &str,
        mode: ApiMode,
    ) -> Result<Arc<AnyWeatherService<F>>, AppError> {
        self.create(api_key, mode, &Settings::default())
    }

    pub fn create(
        &mut self,
        api_key: &str,
        mode: ApiMode,
        settings: &Settings,
    ) -> Result<Arc<AnyWeatherService<F>>, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::validation("API key cannot be empty"));
        }
        if self.services.contains_key(api_key) {
            return Err(AppError::service_exists(
                "There is already a service for this API key",
            ));
        }
        settings.validate()?;

        let service = Arc::new(mode.create_service((self.make_fetcher)(api_key), settings)?);
        self.services.insert(api_key.to_string(), service.clone());

        info!(%mode, services = self.services.len(), "Weather service registered");
        Ok(service)
    }

    pub fn get(&self, api_key: &str) -> Option<Arc<AnyWeatherService<F>>> {
        self.services.get(api_key).cloned()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Unregisters the service for `api_key` and shuts it down.
    pub async fn remove(&mut self, api_key: &str) -> Result<(), AppError> {
        let service = self
            .services
            .remove(api_key)
            .ok_or_else(|| AppError::service_not_found("No service found for this API key"))?;

        service.shutdown().await;
        info!(services = self.services.len(), "Weather service removed");
        Ok(())
    }

    pub async fn shutdown_all(&mut self) {
        for (_, service) in self.services.drain() {
            service.shutdown().await;
        }
    }
}
