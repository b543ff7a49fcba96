use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current conditions for one city, reduced to the fields the frontend
/// shows. Temperatures are Celsius, wind speed m/s.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: i32,
    pub description: String,
    pub wind_speed: f64,
}

/// Subset of the OpenWeatherMap payload we read.
#[derive(Deserialize, Debug)]
pub(crate) struct OwmResponse {
    pub name: String,
    pub main: OwmMain,
    #[serde(default)]
    pub weather: Vec<OwmWeather>,
    pub wind: OwmWind,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i32,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmWeather {
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmWind {
    pub speed: f64,
}
