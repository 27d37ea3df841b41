use crate::api_client::WeatherFetcher;
use crate::cache::WeatherCache;
use crate::service::{OnDemandWeatherService, PollingWeatherService, WeatherService};
use crate::settings::Settings;
use common::errors::AppError;
use common::models::WeatherResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a service keeps its cached weather current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiMode {
    /// Refresh only when a caller asks for missing or stale data
    #[default]
    OnDemand,
    /// Additionally refresh every cached location on a schedule
    Polling,
}

impl ApiMode {
    pub fn create_service<F: WeatherFetcher>(
        self,
        fetcher: F,
        settings: &Settings,
    ) -> Result<AnyWeatherService<F>, AppError> {
        Ok(match self {
            ApiMode::OnDemand => {
                AnyWeatherService::OnDemand(OnDemandWeatherService::new(fetcher, settings)?)
            }
            ApiMode::Polling => {
                AnyWeatherService::Polling(PollingWeatherService::new(fetcher, settings)?)
            }
        })
    }
}

impl FromStr for ApiMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on_demand" | "on-demand" | "ondemand" => Ok(ApiMode::OnDemand),
            "polling" => Ok(ApiMode::Polling),
            other => Err(AppError::validation(format!("unknown api mode: {}", other))),
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMode::OnDemand => write!(f, "on_demand"),
            ApiMode::Polling => write!(f, "polling"),
        }
    }
}

/// A service of either mode behind one type.
pub enum AnyWeatherService<F> {
    OnDemand(OnDemandWeatherService<F>),
    Polling(PollingWeatherService<F>),
}

impl<F: WeatherFetcher> AnyWeatherService<F> {
    pub fn mode(&self) -> ApiMode {
        match self {
            AnyWeatherService::OnDemand(_) => ApiMode::OnDemand,
            AnyWeatherService::Polling(_) => ApiMode::Polling,
        }
    }

    pub fn cache(&self) -> &WeatherCache<WeatherResponse> {
        match self {
            AnyWeatherService::OnDemand(service) => service.cache(),
            AnyWeatherService::Polling(service) => service.cache(),
        }
    }
}

impl<F: WeatherFetcher> WeatherService for AnyWeatherService<F> {
    async fn get_weather(&self, location: &str) -> Result<WeatherResponse, AppError> {
        match self {
            AnyWeatherService::OnDemand(service) => service.get_weather(location).await,
            AnyWeatherService::Polling(service) => service.get_weather(location).await,
        }
    }

    async fn shutdown(&self) {
        match self {
            AnyWeatherService::OnDemand(service) => service.shutdown().await,
            AnyWeatherService::Polling(service) => service.shutdown().await,
        }
    }

    fn is_active(&self) -> bool {
        match self {
            AnyWeatherService::OnDemand(service) => service.is_active(),
            AnyWeatherService::Polling(service) => service.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("on_demand".parse::<ApiMode>().unwrap(), ApiMode::OnDemand);
        assert_eq!("On-Demand".parse::<ApiMode>().unwrap(), ApiMode::OnDemand);
        assert_eq!(" POLLING ".parse::<ApiMode>().unwrap(), ApiMode::Polling);
        assert!(matches!(
            "streaming".parse::<ApiMode>(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in [ApiMode::OnDemand, ApiMode::Polling] {
            assert_eq!(mode.to_string().parse::<ApiMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ApiMode::OnDemand).unwrap(), "\"on_demand\"");
        let mode: ApiMode = serde_json::from_str("\"polling\"").unwrap();
        assert_eq!(mode, ApiMode::Polling);
    }
}
