use crate::modules::users::controller::{approve_user, get_experts, get_me, get_users, update_me};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/me", get(get_me).put(update_me))
        .route("/experts", get(get_experts))
        .route("/{id}/approve", put(approve_user))
}
