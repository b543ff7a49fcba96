use axum::Router;
use axum::routing::get;

use crate::modules::crops::controller::{
    create_crop, delete_crop, get_crop, get_crop_recommendations, get_crops,
    get_crops_by_climate, get_crops_by_season, get_crops_by_soil_type, search_crops, update_crop,
};
use crate::state::AppState;

pub fn init_crops_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_crops).post(create_crop))
        .route("/search", get(search_crops))
        .route("/recommendations", get(get_crop_recommendations))
        .route("/season/{season}", get(get_crops_by_season))
        .route("/soil/{soil_type}", get(get_crops_by_soil_type))
        .route("/climate/{climate}", get(get_crops_by_climate))
        .route("/{id}", get(get_crop).put(update_crop).delete(delete_crop))
}
