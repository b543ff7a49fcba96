use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::middleware::policy::{self, Action};
use crate::modules::listings::model::{ProductListing, ProductListingDto};
use crate::modules::users::model::User;
use crate::utils::errors::AppError;

const LISTING_COLUMNS: &str = "id, farmer_id, product_name, category, description, quantity, \
     unit, price, location, contact_number, is_approved, is_available, created_at, updated_at";

pub struct ListingService;

impl ListingService {
    /// Approved, still-available listings for the public marketplace.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "product_listings"))]
    pub async fn get_public_listings(db: &PgPool) -> Result<Vec<ProductListing>, AppError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM product_listings \
             WHERE is_approved = TRUE AND is_available = TRUE ORDER BY created_at DESC"
        );

        let listings = sqlx::query_as::<_, ProductListing>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching public listings");
                AppError::from(e)
            })?;

        Ok(listings)
    }

    /// Every listing one farmer owns, whatever its state.
    #[instrument(skip(db), fields(farmer.id = %farmer_id, db.operation = "SELECT", db.table = "product_listings"))]
    pub async fn get_listings_by_farmer(
        db: &PgPool,
        farmer_id: Uuid,
    ) -> Result<Vec<ProductListing>, AppError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM product_listings \
             WHERE farmer_id = $1 ORDER BY created_at DESC"
        );

        let listings = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(farmer_id)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, farmer.id = %farmer_id, "Database error fetching listings");
                AppError::from(e)
            })?;

        Ok(listings)
    }

    #[instrument(skip(db), fields(listing.id = %id, db.operation = "SELECT", db.table = "product_listings"))]
    pub async fn get_listing(db: &PgPool, id: Uuid) -> Result<ProductListing, AppError> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM product_listings WHERE id = $1");

        let listing = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, listing.id = %id, "Database error fetching listing");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Product listing not found")))?;

        Ok(listing)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "product_listings"))]
    pub async fn get_listings_by_category(
        db: &PgPool,
        category: &str,
    ) -> Result<Vec<ProductListing>, AppError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM product_listings \
             WHERE category = $1 AND is_approved = TRUE AND is_available = TRUE \
             ORDER BY created_at DESC"
        );

        let listings = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(category)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, category = %category, "Database error fetching listings");
                AppError::from(e)
            })?;

        Ok(listings)
    }

    /// Case-insensitive product name search over approved listings.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "product_listings"))]
    pub async fn search_listings(
        db: &PgPool,
        product_name: &str,
    ) -> Result<Vec<ProductListing>, AppError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM product_listings \
             WHERE product_name ILIKE $1 AND is_approved = TRUE ORDER BY created_at DESC"
        );

        let listings = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(format!("%{product_name}%"))
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error searching listings");
                AppError::from(e)
            })?;

        Ok(listings)
    }

    #[instrument(skip(db, dto), fields(farmer.id = %farmer_id, db.operation = "INSERT", db.table = "product_listings"))]
    pub async fn create_listing(
        db: &PgPool,
        farmer_id: Uuid,
        dto: ProductListingDto,
    ) -> Result<ProductListing, AppError> {
        let sql = format!(
            "INSERT INTO product_listings (farmer_id, product_name, category, description, \
             quantity, unit, price, location, contact_number, is_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {LISTING_COLUMNS}"
        );

        let listing = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(farmer_id)
            .bind(&dto.product_name)
            .bind(&dto.category)
            .bind(&dto.description)
            .bind(dto.quantity)
            .bind(&dto.unit)
            .bind(dto.price)
            .bind(&dto.location)
            .bind(&dto.contact_number)
            .bind(dto.is_available.unwrap_or(true))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error creating listing");
                AppError::from(e)
            })?;

        info!(listing.id = %listing.id, product = %listing.product_name, "Listing created");

        Ok(listing)
    }

    /// Full replace of the farmer-owned fields. Ownership and moderation
    /// state survive the update.
    #[instrument(skip(db, caller, dto), fields(listing.id = %id, caller.id = %caller.id, db.operation = "UPDATE", db.table = "product_listings"))]
    pub async fn update_listing(
        db: &PgPool,
        id: Uuid,
        caller: &User,
        dto: ProductListingDto,
    ) -> Result<ProductListing, AppError> {
        let current = Self::get_listing(db, id).await?;

        policy::authorize_owned(caller, Action::ListingUpdate, current.farmer_id)?;

        let sql = format!(
            "UPDATE product_listings SET product_name = $2, category = $3, description = $4, \
             quantity = $5, unit = $6, price = $7, location = $8, contact_number = $9, \
             is_available = $10, updated_at = NOW() WHERE id = $1 RETURNING {LISTING_COLUMNS}"
        );

        let listing = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(id)
            .bind(&dto.product_name)
            .bind(&dto.category)
            .bind(&dto.description)
            .bind(dto.quantity)
            .bind(&dto.unit)
            .bind(dto.price)
            .bind(&dto.location)
            .bind(&dto.contact_number)
            .bind(dto.is_available.unwrap_or(current.is_available))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, listing.id = %id, "Database error updating listing");
                AppError::from(e)
            })?;

        info!(listing.id = %listing.id, "Listing updated");

        Ok(listing)
    }

    #[instrument(skip(db, caller), fields(listing.id = %id, caller.id = %caller.id, db.operation = "DELETE", db.table = "product_listings"))]
    pub async fn delete_listing(db: &PgPool, id: Uuid, caller: &User) -> Result<(), AppError> {
        let current = Self::get_listing(db, id).await?;

        policy::authorize_owned(caller, Action::ListingDelete, current.farmer_id)?;

        sqlx::query("DELETE FROM product_listings WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, listing.id = %id, "Database error deleting listing");
                AppError::from(e)
            })?;

        info!(listing.id = %id, "Listing deleted");

        Ok(())
    }

    /// Marks a listing approved. Admin moderation surface.
    #[instrument(skip(db), fields(listing.id = %id, db.operation = "UPDATE", db.table = "product_listings"))]
    pub async fn approve_listing(db: &PgPool, id: Uuid) -> Result<ProductListing, AppError> {
        let sql = format!(
            "UPDATE product_listings SET is_approved = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {LISTING_COLUMNS}"
        );

        let listing = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, listing.id = %id, "Database error approving listing");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Product listing not found")))?;

        info!(listing.id = %listing.id, "Listing approved");

        Ok(listing)
    }
}
