use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::{self, Action};
use crate::modules::answers::model::{Answer, CreateAnswerDto, UpdateAnswerDto};
use crate::modules::answers::service::AnswerService;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Approved answers for one question, best-voted first.
#[utoipa::path(
    get,
    path = "/api/answers/question/{question_id}",
    params(("question_id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 200, description = "Answers for the question", body = Vec<Answer>),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Answers"
)]
#[instrument(skip(state))]
pub async fn get_answers_by_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<Json<Vec<Answer>>, AppError> {
    let answers = AnswerService::get_answers_by_question(&state.db, question_id).await?;
    Ok(Json(answers))
}

/// Approved answers one expert has written, newest first.
#[utoipa::path(
    get,
    path = "/api/answers/expert/{expert_id}",
    params(("expert_id" = Uuid, Path, description = "Expert id")),
    responses(
        (status = 200, description = "Answers by the expert", body = Vec<Answer>),
        (status = 404, description = "Expert not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Answers"
)]
#[instrument(skip(state))]
pub async fn get_answers_by_expert(
    State(state): State<AppState>,
    Path(expert_id): Path<Uuid>,
) -> Result<Json<Vec<Answer>>, AppError> {
    let answers = AnswerService::get_answers_by_expert(&state.db, expert_id).await?;
    Ok(Json(answers))
}

#[utoipa::path(
    post,
    path = "/api/answers",
    request_body = CreateAnswerDto,
    responses(
        (status = 201, description = "Answer created", body = Answer),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed or expert not approved", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Answers"
)]
#[instrument(skip(state, user, dto))]
pub async fn create_answer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateAnswerDto>,
) -> Result<(StatusCode, Json<Answer>), AppError> {
    policy::authorize(&user, Action::AnswerCreate)?;

    let answer = AnswerService::create_answer(&state.db, &user, dto).await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

#[utoipa::path(
    put,
    path = "/api/answers/{id}",
    params(("id" = Uuid, Path, description = "Answer id")),
    request_body = UpdateAnswerDto,
    responses(
        (status = 200, description = "Answer updated", body = Answer),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller does not own the answer", body = ErrorResponse),
        (status = 404, description = "Answer not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Answers"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<UpdateAnswerDto>,
) -> Result<Json<Answer>, AppError> {
    let answer = AnswerService::update_answer(&state.db, id, &user, dto).await?;
    Ok(Json(answer))
}

/// Marks an answer as the accepted one and resolves its question.
#[utoipa::path(
    post,
    path = "/api/answers/{id}/accept",
    params(("id" = Uuid, Path, description = "Answer id")),
    responses(
        (status = 200, description = "Answer accepted", body = Answer),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller does not own the question", body = ErrorResponse),
        (status = 404, description = "Answer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Answers"
)]
#[instrument(skip(state, user))]
pub async fn accept_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Answer>, AppError> {
    let answer = AnswerService::accept_answer(&state.db, id, &user).await?;
    Ok(Json(answer))
}

#[utoipa::path(
    delete,
    path = "/api/answers/{id}",
    params(("id" = Uuid, Path, description = "Answer id")),
    responses(
        (status = 204, description = "Answer deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller does not own the answer", body = ErrorResponse),
        (status = 404, description = "Answer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Answers"
)]
#[instrument(skip(state, user))]
pub async fn delete_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    AnswerService::delete_answer(&state.db, id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
