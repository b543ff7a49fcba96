use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::{self, Action};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::questions::model::{CreateQuestionDto, Question, UpdateQuestionDto};
use crate::modules::questions::service::QuestionService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Public feed of approved questions.
#[utoipa::path(
    get,
    path = "/api/questions/public",
    responses(
        (status = 200, description = "Approved questions, newest first", body = Vec<Question>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn get_public_questions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Question>>, AppError> {
    let questions = QuestionService::get_public_questions(&state.db).await?;
    Ok(Json(questions))
}

/// Feed for the authenticated caller. Farmers get their own questions,
/// experts and admins get every approved one.
#[utoipa::path(
    get,
    path = "/api/questions",
    responses(
        (status = 200, description = "Questions visible to the caller", body = Vec<Question>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, user))]
pub async fn get_questions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Question>>, AppError> {
    policy::authorize(&user, Action::QuestionList)?;

    let questions = QuestionService::get_questions_for(&state.db, &user).await?;
    Ok(Json(questions))
}

/// Approved questions still waiting for an accepted answer.
#[utoipa::path(
    get,
    path = "/api/questions/unresolved",
    responses(
        (status = 200, description = "Unresolved questions, newest first", body = Vec<Question>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, user))]
pub async fn get_unresolved_questions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Question>>, AppError> {
    policy::authorize(&user, Action::QuestionListUnresolved)?;

    let questions = QuestionService::get_unresolved_questions(&state.db).await?;
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question found", body = Question),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Question>, AppError> {
    let question = QuestionService::get_question(&state.db, id).await?;
    Ok(Json(question))
}

#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionDto,
    responses(
        (status = 201, description = "Question created", body = Question),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, user, dto))]
pub async fn create_question(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateQuestionDto>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    policy::authorize(&user, Action::QuestionCreate)?;

    let question = QuestionService::create_question(&state.db, user.id, dto).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(("id" = Uuid, Path, description = "Question id")),
    request_body = UpdateQuestionDto,
    responses(
        (status = 200, description = "Question updated", body = Question),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller does not own the question", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<UpdateQuestionDto>,
) -> Result<Json<Question>, AppError> {
    let question = QuestionService::update_question(&state.db, id, &user, dto).await?;
    Ok(Json(question))
}

#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(("id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller does not own the question", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, user))]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    QuestionService::delete_question(&state.db, id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
