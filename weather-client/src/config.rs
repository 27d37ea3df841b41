use crate::api_client::OPENWEATHER_API_URL;
use crate::mode::ApiMode;
use crate::settings::Settings;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub mode: ApiMode,
    pub settings: Settings,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Reads the environment. Call after logging is initialized so that
    /// unparseable values are reported.
    pub fn from_env() -> Self {
        let defaults = Settings::default();
        let settings = Settings::builder()
            .data_freshness_minutes(
                parse_var("DATA_FRESHNESS_MINUTES").unwrap_or(defaults.data_freshness_minutes),
            )
            .cache_size(parse_var("CACHE_SIZE").unwrap_or(defaults.cache.size))
            .polling_initial_delay(
                parse_var("POLLING_INITIAL_DELAY_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.polling.initial_delay),
            )
            .polling_period(
                parse_var("POLLING_PERIOD_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.polling.period),
            )
            .build();

        Self {
            api_key: env::var("OPENWEATHER_API_KEY").unwrap_or_default(),
            api_url: env::var("OPENWEATHER_API_URL")
                .unwrap_or_else(|_| OPENWEATHER_API_URL.to_string()),
            mode: parse_var("WEATHER_MODE").unwrap_or_default(),
            settings,
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS").unwrap_or(10),
        }
    }
}

/// `LOG_FORMAT=json` selects structured JSON logs.
pub fn json_logs_from_env() -> bool {
    env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"))
}

fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value(name, env::var(name).ok())
}

fn parse_value<T>(name: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(variable = name, value = %raw, error = %e, "Ignoring unparseable setting, using default");
            None
        }
    }
}
