#![allow(dead_code)]

use chrono::Utc;
use common::errors::AppError;
use common::models::WeatherResponse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use weather_client::WeatherFetcher;
use weather_client::cache::normalize_location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Succeed,
    FailFetch,
    FailInternal,
    Panic,
}

/// In-memory fetcher that counts calls and returns observations `offset` seconds from now.
#[derive(Clone)]
pub struct MockFetcher {
    state: Arc<MockState>,
}

struct MockState {
    calls: AtomicUsize,
    per_location: Mutex<HashMap<String, usize>>,
    behaviour: Mutex<Behaviour>,
    offset_secs: AtomicI64,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            state: Arc::new(MockState {
                calls: AtomicUsize::new(0),
                per_location: Mutex::new(HashMap::new()),
                behaviour: Mutex::new(Behaviour::Succeed),
                offset_secs: AtomicI64::new(0),
            }),
        }
    }
}

impl MockFetcher {
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, location: &str) -> usize {
        let per_location = self.state.per_location.lock().unwrap();
        per_location
            .get(&normalize_location(location))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_behaviour(&self, behaviour: Behaviour) {
        *self.state.behaviour.lock().unwrap() = behaviour;
    }

    /// Observations returned from now on are `offset_secs` away from the current time.
    pub fn set_observed_offset(&self, offset_secs: i64) {
        self.state.offset_secs.store(offset_secs, Ordering::SeqCst);
    }
}

impl WeatherFetcher for MockFetcher {
    async fn fetch(&self, location: &str) -> Result<WeatherResponse, AppError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .state
            .per_location
            .lock()
            .unwrap()
            .entry(normalize_location(location))
            .or_default() += 1;

        let behaviour = *self.state.behaviour.lock().unwrap();
        match behaviour {
            Behaviour::Succeed => {
                let dt = Utc::now().timestamp() + self.state.offset_secs.load(Ordering::SeqCst);
                Ok(weather(location, dt))
            }
            Behaviour::FailFetch => Err(AppError::http(503, "upstream unavailable")),
            Behaviour::FailInternal => Err(AppError::internal("corrupted refresh state")),
            Behaviour::Panic => panic!("fetcher exploded"),
        }
    }
}

pub fn weather(name: &str, dt: i64) -> WeatherResponse {
    WeatherResponse {
        name: name.to_string(),
        dt,
        cod: 200,
        ..Default::default()
    }
}
