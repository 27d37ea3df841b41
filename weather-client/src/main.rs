use common::http_client::HttpClient;
use common::tracing::{init_tracing, init_tracing_pretty};
use tracing::{error, info};
use weather_client::config::{Config, json_logs_from_env};
use weather_client::{OpenWeatherClient, WeatherService, WeatherServiceRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if json_logs_from_env() {
        init_tracing();
    } else {
        init_tracing_pretty();
    }
    let config = Config::from_env();

    let locations: Vec<String> = std::env::args().skip(1).collect();
    if locations.is_empty() {
        eprintln!("usage: weather-cli <LOCATION>...");
        std::process::exit(2);
    }

    let http_client = HttpClient::new(config.http_timeout_secs)?;
    let api_url = config.api_url.clone();
    let mut registry = WeatherServiceRegistry::new(move |api_key: &str| {
        OpenWeatherClient::new(http_client.clone(), api_url.clone(), api_key)
    });

    let service = registry.create(&config.api_key, config.mode, &config.settings)?;
    info!(mode = %config.mode, count = locations.len(), "Requesting weather");

    let mut failures = 0;
    for location in &locations {
        match service.get_weather(location).await {
            Ok(weather) => println!("{}", serde_json::to_string_pretty(&weather)?),
            Err(e) => {
                failures += 1;
                error!(location = %location, error = %e, "Weather request failed");
            }
        }
    }

    registry.shutdown_all().await;
    info!(failures, "Weather client stopped");

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
