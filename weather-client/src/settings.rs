use crate::cache::DEFAULT_CACHE_SIZE;
use crate::freshness::DEFAULT_DATA_FRESHNESS_MINUTES;
use common::errors::AppError;
use std::time::Duration;

pub const DEFAULT_POLLING_INITIAL_DELAY: Duration = Duration::ZERO;
pub const DEFAULT_POLLING_PERIOD: Duration = Duration::from_secs(5);

/// Tuning knobs for a weather service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Minutes after which a cached observation must be refetched
    pub data_freshness_minutes: u64,
    pub cache: CacheSettings,
    /// Only consulted by the polling mode
    pub polling: PollingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingSettings {
    pub initial_delay: Duration,
    pub period: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_freshness_minutes: DEFAULT_DATA_FRESHNESS_MINUTES,
            cache: CacheSettings::default(),
            polling: PollingSettings::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_POLLING_INITIAL_DELAY,
            period: DEFAULT_POLLING_PERIOD,
        }
    }
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.data_freshness_minutes == 0 {
            return Err(AppError::validation(
                "data_freshness_minutes: Data freshness period must be positive",
            ));
        }
        if self.cache.size == 0 {
            return Err(AppError::validation("cache.size: Cache size must be positive"));
        }
        if self.polling.period.is_zero() {
            return Err(AppError::validation("polling.period: Polling period must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn data_freshness_minutes(mut self, minutes: u64) -> Self {
        self.settings.data_freshness_minutes = minutes;
        self
    }

    pub fn cache_size(mut self, size: usize) -> Self {
        self.settings.cache.size = size;
        self
    }

    pub fn polling_initial_delay(mut self, delay: Duration) -> Self {
        self.settings.polling.initial_delay = delay;
        self
    }

    pub fn polling_period(mut self, period: Duration) -> Self {
        self.settings.polling.period = period;
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}
