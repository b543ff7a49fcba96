use axum::Router;
use axum::routing::get;

use crate::modules::questions::controller::{
    create_question, delete_question, get_public_questions, get_question, get_questions,
    get_unresolved_questions, update_question,
};
use crate::state::AppState;

pub fn init_questions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_questions).post(create_question))
        .route("/public", get(get_public_questions))
        .route("/unresolved", get(get_unresolved_questions))
        .route(
            "/{id}",
            get(get_question).put(update_question).delete(delete_question),
        )
}
