use axum::Router;
use axum::routing::get;

use crate::modules::schemes::controller::{
    create_scheme, delete_scheme, get_all_schemes, get_public_schemes, get_scheme,
    get_schemes_by_category, search_schemes, update_scheme,
};
use crate::state::AppState;

pub fn init_schemes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_schemes).post(create_scheme))
        .route("/public", get(get_public_schemes))
        .route("/search", get(search_schemes))
        .route("/category/{category}", get(get_schemes_by_category))
        .route("/{id}", get(get_scheme).put(update_scheme).delete(delete_scheme))
}
