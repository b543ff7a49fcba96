use axum::Router;
use axum::routing::{get, put};

use crate::modules::listings::controller::{
    approve_listing, create_listing, delete_listing, get_listing, get_listings_by_category,
    get_my_listings, get_public_listings, search_listings, update_listing,
};
use crate::state::AppState;

pub fn init_listings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_my_listings).post(create_listing))
        .route("/public", get(get_public_listings))
        .route("/search", get(search_listings))
        .route("/category/{category}", get(get_listings_by_category))
        .route(
            "/{id}",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
        .route("/{id}/approve", put(approve_listing))
}
