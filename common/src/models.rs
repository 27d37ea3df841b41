use serde::{Deserialize, Serialize};

/// Current weather payload returned by the OpenWeather API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WeatherResponse {
    #[serde(default)]
    pub coord: Option<Coord>,
    #[serde(default)]
    pub weather: Vec<Weather>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub main: Option<Main>,
    #[serde(default)]
    pub visibility: Option<i32>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub snow: Option<Precipitation>,
    /// Unix timestamp (seconds) of the observation upstream
    pub dt: i64,
    #[serde(default)]
    pub sys: Option<Sys>,
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cod: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Weather {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Main {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub pressure: i32,
    #[serde(default)]
    pub humidity: i32,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub sea_level: Option<i32>,
    #[serde(default, rename = "grnd_level")]
    pub ground_level: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: i32,
    #[serde(default)]
    pub gust: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Clouds {
    pub all: i32,
}

/// Rain or snow volume in mm
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Precipitation {
    #[serde(default, rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(default, rename = "3h")]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Sys {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}
