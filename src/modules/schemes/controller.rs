use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::{self, Action};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::crops::model::SearchParams;
use crate::modules::schemes::model::{GovernmentScheme, GovernmentSchemeDto};
use crate::modules::schemes::service::SchemeService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Active, approved schemes anyone may browse.
#[utoipa::path(
    get,
    path = "/api/government-schemes/public",
    responses(
        (status = 200, description = "Active approved schemes, newest first", body = Vec<GovernmentScheme>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Government Schemes"
)]
#[instrument(skip(state))]
pub async fn get_public_schemes(
    State(state): State<AppState>,
) -> Result<Json<Vec<GovernmentScheme>>, AppError> {
    let schemes = SchemeService::get_public_schemes(&state.db).await?;
    Ok(Json(schemes))
}

/// Every scheme including inactive and unapproved ones.
#[utoipa::path(
    get,
    path = "/api/government-schemes",
    responses(
        (status = 200, description = "All schemes", body = Vec<GovernmentScheme>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Government Schemes"
)]
#[instrument(skip(state, user))]
pub async fn get_all_schemes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<GovernmentScheme>>, AppError> {
    policy::authorize(&user, Action::SchemeListAll)?;

    let schemes = SchemeService::get_all_schemes(&state.db).await?;
    Ok(Json(schemes))
}

#[utoipa::path(
    get,
    path = "/api/government-schemes/{id}",
    params(("id" = Uuid, Path, description = "Scheme id")),
    responses(
        (status = 200, description = "Scheme found", body = GovernmentScheme),
        (status = 404, description = "Scheme not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Government Schemes"
)]
#[instrument(skip(state))]
pub async fn get_scheme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GovernmentScheme>, AppError> {
    let scheme = SchemeService::get_scheme(&state.db, id).await?;
    Ok(Json(scheme))
}

#[utoipa::path(
    get,
    path = "/api/government-schemes/category/{category}",
    params(("category" = String, Path, description = "Scheme category")),
    responses(
        (status = 200, description = "Active approved schemes in the category", body = Vec<GovernmentScheme>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Government Schemes"
)]
#[instrument(skip(state))]
pub async fn get_schemes_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<GovernmentScheme>>, AppError> {
    let schemes = SchemeService::get_schemes_by_category(&state.db, &category).await?;
    Ok(Json(schemes))
}

#[utoipa::path(
    get,
    path = "/api/government-schemes/search",
    params(("query" = String, Query, description = "Substring matched against title and description")),
    responses(
        (status = 200, description = "Matching schemes", body = Vec<GovernmentScheme>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Government Schemes"
)]
#[instrument(skip(state))]
pub async fn search_schemes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<GovernmentScheme>>, AppError> {
    let schemes = SchemeService::search_schemes(&state.db, &params.query).await?;
    Ok(Json(schemes))
}

#[utoipa::path(
    post,
    path = "/api/government-schemes",
    request_body = GovernmentSchemeDto,
    responses(
        (status = 201, description = "Scheme created", body = GovernmentScheme),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Government Schemes"
)]
#[instrument(skip(state, user, dto))]
pub async fn create_scheme(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<GovernmentSchemeDto>,
) -> Result<(StatusCode, Json<GovernmentScheme>), AppError> {
    policy::authorize(&user, Action::SchemeManage)?;

    let scheme = SchemeService::create_scheme(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(scheme)))
}

#[utoipa::path(
    put,
    path = "/api/government-schemes/{id}",
    params(("id" = Uuid, Path, description = "Scheme id")),
    request_body = GovernmentSchemeDto,
    responses(
        (status = 200, description = "Scheme updated", body = GovernmentScheme),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Scheme not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Government Schemes"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_scheme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<GovernmentSchemeDto>,
) -> Result<Json<GovernmentScheme>, AppError> {
    policy::authorize(&user, Action::SchemeManage)?;

    let scheme = SchemeService::update_scheme(&state.db, id, dto).await?;
    Ok(Json(scheme))
}

#[utoipa::path(
    delete,
    path = "/api/government-schemes/{id}",
    params(("id" = Uuid, Path, description = "Scheme id")),
    responses(
        (status = 204, description = "Scheme deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Scheme not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Government Schemes"
)]
#[instrument(skip(state, user))]
pub async fn delete_scheme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    policy::authorize(&user, Action::SchemeManage)?;

    SchemeService::delete_scheme(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
