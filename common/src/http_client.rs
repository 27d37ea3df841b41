use crate::errors::AppError;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// HTTP client with a request timeout. Failures are surfaced once, never retried.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Fetch JSON from URL. The URL is not recorded since it may carry credentials.
    #[instrument(skip_all)]
    pub async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.fetch_with_timeout(url).await {
            Ok(response) => {
                debug!("Request successful");
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status_code(), "Request failed");
                Err(e)
            }
        }
    }

    async fn fetch_with_timeout<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| AppError::timeout("Request timed out"))?
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::timeout("Request timed out")
                } else {
                    AppError::NetworkError(e.without_url())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::http(
                status.as_u16(),
                format!("API error: {}", body),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(e.without_url()))?;
        let json: T = serde_json::from_str(&text).map_err(AppError::ParseError)?;

        Ok(json)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }
}
