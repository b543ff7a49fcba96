use anyhow::anyhow;
use tracing::{error, instrument, warn};

use crate::config::weather::WeatherConfig;
use crate::modules::weather::model::{OwmResponse, WeatherReport};
use crate::utils::errors::AppError;

pub struct WeatherService;

impl WeatherService {
    /// Fetches current conditions for a city from OpenWeatherMap.
    ///
    /// Upstream 404 surfaces as not-found; a rejected API key is our
    /// misconfiguration, not the caller's, so it maps to internal.
    #[instrument(skip(http, config), fields(city = %city))]
    pub async fn get_current_weather(
        http: &reqwest::Client,
        config: &WeatherConfig,
        city: &str,
    ) -> Result<WeatherReport, AppError> {
        let url = format!("{}/weather", config.base_url);

        let response = http
            .get(&url)
            .query(&[("q", city), ("appid", &config.api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Weather upstream request failed");
                AppError::internal(anyhow!("Weather service unavailable"))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(anyhow!("City not found: {city}")));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            error!("Weather upstream rejected the API key");
            return Err(AppError::internal(anyhow!("Weather service misconfigured")));
        }
        if !status.is_success() {
            warn!(status = %status, "Unexpected weather upstream status");
            return Err(AppError::internal(anyhow!("Weather service unavailable")));
        }

        let payload: OwmResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Weather upstream returned an unreadable body");
            AppError::internal(anyhow!("Weather service unavailable"))
        })?;

        Ok(WeatherReport {
            city: payload.name,
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            humidity: payload.main.humidity,
            description: payload
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_default(),
            wind_speed: payload.wind.speed,
        })
    }
}
