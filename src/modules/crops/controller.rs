use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::{self, Action};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::crops::model::{Crop, CropDto, RecommendationParams, SearchParams};
use crate::modules::crops::service::CropService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/crops",
    responses(
        (status = 200, description = "All crops", body = Vec<Crop>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Crops"
)]
#[instrument(skip(state))]
pub async fn get_crops(State(state): State<AppState>) -> Result<Json<Vec<Crop>>, AppError> {
    let crops = CropService::get_all_crops(&state.db).await?;
    Ok(Json(crops))
}

#[utoipa::path(
    get,
    path = "/api/crops/{id}",
    params(("id" = Uuid, Path, description = "Crop id")),
    responses(
        (status = 200, description = "Crop found", body = Crop),
        (status = 404, description = "Crop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Crops"
)]
#[instrument(skip(state))]
pub async fn get_crop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Crop>, AppError> {
    let crop = CropService::get_crop(&state.db, id).await?;
    Ok(Json(crop))
}

#[utoipa::path(
    get,
    path = "/api/crops/season/{season}",
    params(("season" = String, Path, description = "Season name, e.g. Kharif")),
    responses(
        (status = 200, description = "Crops for the season", body = Vec<Crop>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Crops"
)]
#[instrument(skip(state))]
pub async fn get_crops_by_season(
    State(state): State<AppState>,
    Path(season): Path<String>,
) -> Result<Json<Vec<Crop>>, AppError> {
    let crops = CropService::get_crops_by_season(&state.db, &season).await?;
    Ok(Json(crops))
}

#[utoipa::path(
    get,
    path = "/api/crops/soil/{soil_type}",
    params(("soil_type" = String, Path, description = "Soil type")),
    responses(
        (status = 200, description = "Crops for the soil type", body = Vec<Crop>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Crops"
)]
#[instrument(skip(state))]
pub async fn get_crops_by_soil_type(
    State(state): State<AppState>,
    Path(soil_type): Path<String>,
) -> Result<Json<Vec<Crop>>, AppError> {
    let crops = CropService::get_crops_by_soil_type(&state.db, &soil_type).await?;
    Ok(Json(crops))
}

#[utoipa::path(
    get,
    path = "/api/crops/climate/{climate}",
    params(("climate" = String, Path, description = "Climate")),
    responses(
        (status = 200, description = "Crops for the climate", body = Vec<Crop>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Crops"
)]
#[instrument(skip(state))]
pub async fn get_crops_by_climate(
    State(state): State<AppState>,
    Path(climate): Path<String>,
) -> Result<Json<Vec<Crop>>, AppError> {
    let crops = CropService::get_crops_by_climate(&state.db, &climate).await?;
    Ok(Json(crops))
}

#[utoipa::path(
    get,
    path = "/api/crops/search",
    params(("query" = String, Query, description = "Substring matched against name and description")),
    responses(
        (status = 200, description = "Matching crops", body = Vec<Crop>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Crops"
)]
#[instrument(skip(state))]
pub async fn search_crops(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Crop>>, AppError> {
    let crops = CropService::search_crops(&state.db, &params.query).await?;
    Ok(Json(crops))
}

#[utoipa::path(
    get,
    path = "/api/crops/recommendations",
    params(
        ("season" = String, Query, description = "Season to match"),
        ("soil_type" = String, Query, description = "Soil type to match"),
        ("climate" = Option<String>, Query, description = "Optional climate filter")
    ),
    responses(
        (status = 200, description = "Recommended crops", body = Vec<Crop>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Crops"
)]
#[instrument(skip(state))]
pub async fn get_crop_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<Vec<Crop>>, AppError> {
    let crops = CropService::get_recommendations(
        &state.db,
        &params.season,
        &params.soil_type,
        params.climate.as_deref(),
    )
    .await?;
    Ok(Json(crops))
}

#[utoipa::path(
    post,
    path = "/api/crops",
    request_body = CropDto,
    responses(
        (status = 201, description = "Crop created", body = Crop),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Crops"
)]
#[instrument(skip(state, user, dto))]
pub async fn create_crop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CropDto>,
) -> Result<(StatusCode, Json<Crop>), AppError> {
    policy::authorize(&user, Action::CropManage)?;

    let crop = CropService::create_crop(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(crop)))
}

#[utoipa::path(
    put,
    path = "/api/crops/{id}",
    params(("id" = Uuid, Path, description = "Crop id")),
    request_body = CropDto,
    responses(
        (status = 200, description = "Crop updated", body = Crop),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Crop not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Crops"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_crop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CropDto>,
) -> Result<Json<Crop>, AppError> {
    policy::authorize(&user, Action::CropManage)?;

    let crop = CropService::update_crop(&state.db, id, dto).await?;
    Ok(Json(crop))
}

#[utoipa::path(
    delete,
    path = "/api/crops/{id}",
    params(("id" = Uuid, Path, description = "Crop id")),
    responses(
        (status = 204, description = "Crop deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Crop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Crops"
)]
#[instrument(skip(state, user))]
pub async fn delete_crop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    policy::authorize(&user, Action::CropManage)?;

    CropService::delete_crop(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
