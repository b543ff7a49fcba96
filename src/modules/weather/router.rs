use axum::Router;
use axum::routing::get;

use crate::modules::weather::controller::get_current_weather;
use crate::state::AppState;

pub fn init_weather_router() -> Router<AppState> {
    Router::new().route("/current/{city}", get(get_current_weather))
}
