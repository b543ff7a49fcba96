use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::{self, Action};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::users::model::{UpdateProfileDto, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

/// List all accounts
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, user))]
pub async fn get_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    policy::authorize(&user, Action::UserList)?;
    let users = UserService::get_all_users(&state.db).await?;
    Ok(Json(users))
}

/// Get own profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "The caller's account", body = User),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(user))]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Result<Json<User>, AppError> {
    Ok(Json(user))
}

/// Update own profile
#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<User>, AppError> {
    let updated = UserService::update_profile(&state.db, user.id, dto).await?;
    Ok(Json(updated))
}

/// Public directory of approved experts
#[utoipa::path(
    get,
    path = "/api/users/experts",
    responses(
        (status = 200, description = "Approved experts, best rated first", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_experts(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let experts = UserService::get_approved_experts(&state.db).await?;
    Ok(Json(experts))
}

/// Approve an account (expert onboarding)
#[utoipa::path(
    put,
    path = "/api/users/{id}/approve",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User approved", body = User),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, user), fields(user.id = %id))]
pub async fn approve_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    policy::authorize(&user, Action::UserApprove)?;
    let approved = UserService::approve_user(&state.db, id).await?;
    Ok(Json(approved))
}
