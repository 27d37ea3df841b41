use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::WeatherResponse;
use std::future::Future;
use tracing::{info, instrument};

pub const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Retrieves the current weather for a location from some remote source.
pub trait WeatherFetcher: Send + Sync + 'static {
    fn fetch(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<WeatherResponse, AppError>> + Send;
}

/// OpenWeather "current weather" client bound to one API key.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(http_client: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn build_url(&self, location: &str) -> String {
        format!(
            "{}?q={}&appid={}",
            self.base_url,
            urlencoding::encode(location),
            urlencoding::encode(&self.api_key)
        )
    }
}

impl WeatherFetcher for OpenWeatherClient {
    #[instrument(skip(self), fields(location = %location))]
    async fn fetch(&self, location: &str) -> Result<WeatherResponse, AppError> {
        info!(location = %location, "Fetching weather from API");
        let url = self.build_url(location);
        self.http_client.get_json(&url).await
    }
}
