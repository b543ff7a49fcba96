use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::{self, Action};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::market_prices::model::{MarketPrice, MarketPriceDto, PriceListParams};
use crate::modules::market_prices::service::MarketPriceService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Approved prices, optionally filtered to one commodity.
#[utoipa::path(
    get,
    path = "/api/market-prices",
    params(("commodity_name" = Option<String>, Query, description = "Filter to one commodity")),
    responses(
        (status = 200, description = "Approved prices, newest first", body = Vec<MarketPrice>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Market Prices"
)]
#[instrument(skip(state))]
pub async fn get_market_prices(
    State(state): State<AppState>,
    Query(params): Query<PriceListParams>,
) -> Result<Json<Vec<MarketPrice>>, AppError> {
    let prices = match params.commodity_name.filter(|c| !c.is_empty()) {
        Some(commodity) => {
            MarketPriceService::get_prices_by_commodity(&state.db, &commodity).await?
        }
        None => MarketPriceService::get_approved_prices(&state.db).await?,
    };
    Ok(Json(prices))
}

#[utoipa::path(
    get,
    path = "/api/market-prices/{id}",
    params(("id" = Uuid, Path, description = "Price entry id")),
    responses(
        (status = 200, description = "Price entry found", body = MarketPrice),
        (status = 404, description = "Price entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Market Prices"
)]
#[instrument(skip(state))]
pub async fn get_market_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MarketPrice>, AppError> {
    let price = MarketPriceService::get_price(&state.db, id).await?;
    Ok(Json(price))
}

#[utoipa::path(
    get,
    path = "/api/market-prices/commodity/{commodity_name}",
    params(("commodity_name" = String, Path, description = "Commodity name")),
    responses(
        (status = 200, description = "Prices for the commodity", body = Vec<MarketPrice>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Market Prices"
)]
#[instrument(skip(state))]
pub async fn get_prices_by_commodity(
    State(state): State<AppState>,
    Path(commodity_name): Path<String>,
) -> Result<Json<Vec<MarketPrice>>, AppError> {
    let prices = MarketPriceService::get_prices_by_commodity(&state.db, &commodity_name).await?;
    Ok(Json(prices))
}

#[utoipa::path(
    get,
    path = "/api/market-prices/state/{state}",
    params(("state" = String, Path, description = "State name")),
    responses(
        (status = 200, description = "Prices observed in the state", body = Vec<MarketPrice>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Market Prices"
)]
#[instrument(skip(state))]
pub async fn get_prices_by_state(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> Result<Json<Vec<MarketPrice>>, AppError> {
    let prices = MarketPriceService::get_prices_by_state(&state.db, &state_name).await?;
    Ok(Json(prices))
}

#[utoipa::path(
    get,
    path = "/api/market-prices/commodities",
    responses(
        (status = 200, description = "Distinct commodity names", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Market Prices"
)]
#[instrument(skip(state))]
pub async fn get_commodities(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let commodities = MarketPriceService::get_commodities(&state.db).await?;
    Ok(Json(commodities))
}

#[utoipa::path(
    post,
    path = "/api/market-prices",
    request_body = MarketPriceDto,
    responses(
        (status = 201, description = "Price entry created", body = MarketPrice),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Market Prices"
)]
#[instrument(skip(state, user, dto))]
pub async fn create_market_price(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<MarketPriceDto>,
) -> Result<(StatusCode, Json<MarketPrice>), AppError> {
    policy::authorize(&user, Action::MarketPriceManage)?;

    let price = MarketPriceService::create_price(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(price)))
}

#[utoipa::path(
    put,
    path = "/api/market-prices/{id}",
    params(("id" = Uuid, Path, description = "Price entry id")),
    request_body = MarketPriceDto,
    responses(
        (status = 200, description = "Price entry updated", body = MarketPrice),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Price entry not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Market Prices"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_market_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<MarketPriceDto>,
) -> Result<Json<MarketPrice>, AppError> {
    policy::authorize(&user, Action::MarketPriceManage)?;

    let price = MarketPriceService::update_price(&state.db, id, dto).await?;
    Ok(Json(price))
}

#[utoipa::path(
    delete,
    path = "/api/market-prices/{id}",
    params(("id" = Uuid, Path, description = "Price entry id")),
    responses(
        (status = 204, description = "Price entry deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Price entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Market Prices"
)]
#[instrument(skip(state, user))]
pub async fn delete_market_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    policy::authorize(&user, Action::MarketPriceManage)?;

    MarketPriceService::delete_price(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
