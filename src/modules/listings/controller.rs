use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::policy::{self, Action};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::listings::model::{ListingSearchParams, ProductListing, ProductListingDto};
use crate::modules::listings::service::ListingService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Approved, available listings anyone may browse.
#[utoipa::path(
    get,
    path = "/api/product-listings/public",
    responses(
        (status = 200, description = "Marketplace listings, newest first", body = Vec<ProductListing>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Product Listings"
)]
#[instrument(skip(state))]
pub async fn get_public_listings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductListing>>, AppError> {
    let listings = ListingService::get_public_listings(&state.db).await?;
    Ok(Json(listings))
}

/// The caller's own listings, including unapproved and sold-out ones.
#[utoipa::path(
    get,
    path = "/api/product-listings",
    responses(
        (status = 200, description = "The caller's listings", body = Vec<ProductListing>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Product Listings"
)]
#[instrument(skip(state, user))]
pub async fn get_my_listings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ProductListing>>, AppError> {
    policy::authorize(&user, Action::ListingListOwn)?;

    let listings = ListingService::get_listings_by_farmer(&state.db, user.id).await?;
    Ok(Json(listings))
}

#[utoipa::path(
    get,
    path = "/api/product-listings/{id}",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing found", body = ProductListing),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Product Listings"
)]
#[instrument(skip(state))]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductListing>, AppError> {
    let listing = ListingService::get_listing(&state.db, id).await?;
    Ok(Json(listing))
}

#[utoipa::path(
    get,
    path = "/api/product-listings/category/{category}",
    params(("category" = String, Path, description = "Product category")),
    responses(
        (status = 200, description = "Listings in the category", body = Vec<ProductListing>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Product Listings"
)]
#[instrument(skip(state))]
pub async fn get_listings_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ProductListing>>, AppError> {
    let listings = ListingService::get_listings_by_category(&state.db, &category).await?;
    Ok(Json(listings))
}

#[utoipa::path(
    get,
    path = "/api/product-listings/search",
    params(("product_name" = String, Query, description = "Substring matched against product names")),
    responses(
        (status = 200, description = "Matching listings", body = Vec<ProductListing>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Product Listings"
)]
#[instrument(skip(state))]
pub async fn search_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingSearchParams>,
) -> Result<Json<Vec<ProductListing>>, AppError> {
    let listings = ListingService::search_listings(&state.db, &params.product_name).await?;
    Ok(Json(listings))
}

#[utoipa::path(
    post,
    path = "/api/product-listings",
    request_body = ProductListingDto,
    responses(
        (status = 201, description = "Listing created", body = ProductListing),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Product Listings"
)]
#[instrument(skip(state, user, dto))]
pub async fn create_listing(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<ProductListingDto>,
) -> Result<(StatusCode, Json<ProductListing>), AppError> {
    policy::authorize(&user, Action::ListingCreate)?;

    let listing = ListingService::create_listing(&state.db, user.id, dto).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

#[utoipa::path(
    put,
    path = "/api/product-listings/{id}",
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body = ProductListingDto,
    responses(
        (status = 200, description = "Listing updated", body = ProductListing),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller does not own the listing", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Product Listings"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<ProductListingDto>,
) -> Result<Json<ProductListing>, AppError> {
    let listing = ListingService::update_listing(&state.db, id, &user, dto).await?;
    Ok(Json(listing))
}

#[utoipa::path(
    delete,
    path = "/api/product-listings/{id}",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller does not own the listing", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Product Listings"
)]
#[instrument(skip(state, user))]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    ListingService::delete_listing(&state.db, id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Approves a listing for the public marketplace.
#[utoipa::path(
    put,
    path = "/api/product-listings/{id}/approve",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing approved", body = ProductListing),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Product Listings"
)]
#[instrument(skip(state, user))]
pub async fn approve_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ProductListing>, AppError> {
    policy::authorize(&user, Action::ListingApprove)?;

    let listing = ListingService::approve_listing(&state.db, id).await?;
    Ok(Json(listing))
}
