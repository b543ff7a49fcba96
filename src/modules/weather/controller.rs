use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::modules::auth::model::ErrorResponse;
use crate::modules::weather::model::WeatherReport;
use crate::modules::weather::service::WeatherService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Current conditions for a city, proxied from OpenWeatherMap.
#[utoipa::path(
    get,
    path = "/api/weather/current/{city}",
    params(("city" = String, Path, description = "City name")),
    responses(
        (status = 200, description = "Current weather", body = WeatherReport),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Upstream unavailable or misconfigured", body = ErrorResponse)
    ),
    tag = "Weather"
)]
#[instrument(skip(state))]
pub async fn get_current_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReport>, AppError> {
    let report =
        WeatherService::get_current_weather(&state.http, &state.weather_config, &city).await?;
    Ok(Json(report))
}
