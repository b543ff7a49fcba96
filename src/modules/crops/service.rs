use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::modules::crops::model::{Crop, CropDto};
use crate::utils::errors::AppError;

const CROP_COLUMNS: &str = "id, name, description, season, soil_type, climate, \
     water_requirement, growth_duration, yield_per_hectare, market_price, image_url, \
     created_at, updated_at";

pub struct CropService;

impl CropService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "crops"))]
    pub async fn get_all_crops(db: &PgPool) -> Result<Vec<Crop>, AppError> {
        let sql = format!("SELECT {CROP_COLUMNS} FROM crops ORDER BY name ASC");

        let crops = sqlx::query_as::<_, Crop>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching crops");
                AppError::from(e)
            })?;

        Ok(crops)
    }

    #[instrument(skip(db), fields(crop.id = %id, db.operation = "SELECT", db.table = "crops"))]
    pub async fn get_crop(db: &PgPool, id: Uuid) -> Result<Crop, AppError> {
        let sql = format!("SELECT {CROP_COLUMNS} FROM crops WHERE id = $1");

        let crop = sqlx::query_as::<_, Crop>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, crop.id = %id, "Database error fetching crop");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Crop not found")))?;

        Ok(crop)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "crops"))]
    pub async fn get_crops_by_season(db: &PgPool, season: &str) -> Result<Vec<Crop>, AppError> {
        let sql = format!("SELECT {CROP_COLUMNS} FROM crops WHERE season = $1 ORDER BY name ASC");

        let crops = sqlx::query_as::<_, Crop>(&sql)
            .bind(season)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, season = %season, "Database error fetching crops by season");
                AppError::from(e)
            })?;

        Ok(crops)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "crops"))]
    pub async fn get_crops_by_soil_type(
        db: &PgPool,
        soil_type: &str,
    ) -> Result<Vec<Crop>, AppError> {
        let sql =
            format!("SELECT {CROP_COLUMNS} FROM crops WHERE soil_type = $1 ORDER BY name ASC");

        let crops = sqlx::query_as::<_, Crop>(&sql)
            .bind(soil_type)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, soil_type = %soil_type, "Database error fetching crops by soil");
                AppError::from(e)
            })?;

        Ok(crops)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "crops"))]
    pub async fn get_crops_by_climate(db: &PgPool, climate: &str) -> Result<Vec<Crop>, AppError> {
        let sql = format!("SELECT {CROP_COLUMNS} FROM crops WHERE climate = $1 ORDER BY name ASC");

        let crops = sqlx::query_as::<_, Crop>(&sql)
            .bind(climate)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, climate = %climate, "Database error fetching crops by climate");
                AppError::from(e)
            })?;

        Ok(crops)
    }

    /// Case-insensitive substring search over name and description.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "crops"))]
    pub async fn search_crops(db: &PgPool, query: &str) -> Result<Vec<Crop>, AppError> {
        let sql = format!(
            "SELECT {CROP_COLUMNS} FROM crops \
             WHERE name ILIKE $1 OR description ILIKE $1 ORDER BY name ASC"
        );

        let crops = sqlx::query_as::<_, Crop>(&sql)
            .bind(format!("%{query}%"))
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error searching crops");
                AppError::from(e)
            })?;

        Ok(crops)
    }

    /// Crops matching the season and soil type, optionally narrowed by
    /// climate (case-insensitive when given).
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "crops"))]
    pub async fn get_recommendations(
        db: &PgPool,
        season: &str,
        soil_type: &str,
        climate: Option<&str>,
    ) -> Result<Vec<Crop>, AppError> {
        let crops = match climate.filter(|c| !c.is_empty()) {
            Some(climate) => {
                let sql = format!(
                    "SELECT {CROP_COLUMNS} FROM crops \
                     WHERE season = $1 AND soil_type = $2 AND LOWER(climate) = LOWER($3) \
                     ORDER BY name ASC"
                );
                sqlx::query_as::<_, Crop>(&sql)
                    .bind(season)
                    .bind(soil_type)
                    .bind(climate)
                    .fetch_all(db)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {CROP_COLUMNS} FROM crops \
                     WHERE season = $1 AND soil_type = $2 ORDER BY name ASC"
                );
                sqlx::query_as::<_, Crop>(&sql)
                    .bind(season)
                    .bind(soil_type)
                    .fetch_all(db)
                    .await
            }
        }
        .map_err(|e| {
            error!(error = %e, "Database error fetching crop recommendations");
            AppError::from(e)
        })?;

        Ok(crops)
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "crops"))]
    pub async fn create_crop(db: &PgPool, dto: CropDto) -> Result<Crop, AppError> {
        let sql = format!(
            "INSERT INTO crops (name, description, season, soil_type, climate, \
             water_requirement, growth_duration, yield_per_hectare, market_price, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {CROP_COLUMNS}"
        );

        let crop = sqlx::query_as::<_, Crop>(&sql)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.season)
            .bind(&dto.soil_type)
            .bind(&dto.climate)
            .bind(&dto.water_requirement)
            .bind(&dto.growth_duration)
            .bind(&dto.yield_per_hectare)
            .bind(&dto.market_price)
            .bind(&dto.image_url)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error creating crop");
                AppError::from(e)
            })?;

        info!(crop.id = %crop.id, crop.name = %crop.name, "Crop created");

        Ok(crop)
    }

    /// Full replace. 404s when the crop is absent.
    #[instrument(skip(db, dto), fields(crop.id = %id, db.operation = "UPDATE", db.table = "crops"))]
    pub async fn update_crop(db: &PgPool, id: Uuid, dto: CropDto) -> Result<Crop, AppError> {
        Self::get_crop(db, id).await?;

        let sql = format!(
            "UPDATE crops SET name = $2, description = $3, season = $4, soil_type = $5, \
             climate = $6, water_requirement = $7, growth_duration = $8, \
             yield_per_hectare = $9, market_price = $10, image_url = $11, updated_at = NOW() \
             WHERE id = $1 RETURNING {CROP_COLUMNS}"
        );

        let crop = sqlx::query_as::<_, Crop>(&sql)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.season)
            .bind(&dto.soil_type)
            .bind(&dto.climate)
            .bind(&dto.water_requirement)
            .bind(&dto.growth_duration)
            .bind(&dto.yield_per_hectare)
            .bind(&dto.market_price)
            .bind(&dto.image_url)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, crop.id = %id, "Database error updating crop");
                AppError::from(e)
            })?;

        info!(crop.id = %crop.id, "Crop updated");

        Ok(crop)
    }

    #[instrument(skip(db), fields(crop.id = %id, db.operation = "DELETE", db.table = "crops"))]
    pub async fn delete_crop(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::get_crop(db, id).await?;

        sqlx::query("DELETE FROM crops WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, crop.id = %id, "Database error deleting crop");
                AppError::from(e)
            })?;

        info!(crop.id = %id, "Crop deleted");

        Ok(())
    }
}
