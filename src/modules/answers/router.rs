use axum::Router;
use axum::routing::{get, post, put};

use crate::modules::answers::controller::{
    accept_answer, create_answer, delete_answer, get_answers_by_expert, get_answers_by_question,
    update_answer,
};
use crate::state::AppState;

pub fn init_answers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_answer))
        .route("/question/{question_id}", get(get_answers_by_question))
        .route("/expert/{expert_id}", get(get_answers_by_expert))
        .route("/{id}", put(update_answer).delete(delete_answer))
        .route("/{id}/accept", post(accept_answer))
}
