use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::modules::market_prices::model::{MarketPrice, MarketPriceDto};
use crate::utils::errors::AppError;

const PRICE_COLUMNS: &str = "id, commodity_name, category, unit, min_price, max_price, \
     modal_price, market_name, state, district, date, is_approved, created_at, updated_at";

pub struct MarketPriceService;

impl MarketPriceService {
    /// Approved prices, most recent observation first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "market_prices"))]
    pub async fn get_approved_prices(db: &PgPool) -> Result<Vec<MarketPrice>, AppError> {
        let sql = format!(
            "SELECT {PRICE_COLUMNS} FROM market_prices \
             WHERE is_approved = TRUE ORDER BY date DESC"
        );

        let prices = sqlx::query_as::<_, MarketPrice>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching market prices");
                AppError::from(e)
            })?;

        Ok(prices)
    }

    #[instrument(skip(db), fields(price.id = %id, db.operation = "SELECT", db.table = "market_prices"))]
    pub async fn get_price(db: &PgPool, id: Uuid) -> Result<MarketPrice, AppError> {
        let sql = format!("SELECT {PRICE_COLUMNS} FROM market_prices WHERE id = $1");

        let price = sqlx::query_as::<_, MarketPrice>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, price.id = %id, "Database error fetching market price");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Market price not found")))?;

        Ok(price)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "market_prices"))]
    pub async fn get_prices_by_commodity(
        db: &PgPool,
        commodity_name: &str,
    ) -> Result<Vec<MarketPrice>, AppError> {
        let sql = format!(
            "SELECT {PRICE_COLUMNS} FROM market_prices \
             WHERE commodity_name = $1 AND is_approved = TRUE ORDER BY date DESC"
        );

        let prices = sqlx::query_as::<_, MarketPrice>(&sql)
            .bind(commodity_name)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, commodity = %commodity_name, "Database error fetching prices");
                AppError::from(e)
            })?;

        Ok(prices)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "market_prices"))]
    pub async fn get_prices_by_state(
        db: &PgPool,
        state: &str,
    ) -> Result<Vec<MarketPrice>, AppError> {
        let sql = format!(
            "SELECT {PRICE_COLUMNS} FROM market_prices \
             WHERE state = $1 AND is_approved = TRUE ORDER BY date DESC"
        );

        let prices = sqlx::query_as::<_, MarketPrice>(&sql)
            .bind(state)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, state = %state, "Database error fetching prices by state");
                AppError::from(e)
            })?;

        Ok(prices)
    }

    /// Distinct commodity names with at least one approved observation.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "market_prices"))]
    pub async fn get_commodities(db: &PgPool) -> Result<Vec<String>, AppError> {
        let commodities = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT commodity_name FROM market_prices \
             WHERE is_approved = TRUE ORDER BY commodity_name ASC",
        )
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching commodity names");
            AppError::from(e)
        })?;

        Ok(commodities)
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "market_prices"))]
    pub async fn create_price(db: &PgPool, dto: MarketPriceDto) -> Result<MarketPrice, AppError> {
        let sql = format!(
            "INSERT INTO market_prices (commodity_name, category, unit, min_price, max_price, \
             modal_price, market_name, state, district, date, is_approved) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {PRICE_COLUMNS}"
        );

        let price = sqlx::query_as::<_, MarketPrice>(&sql)
            .bind(&dto.commodity_name)
            .bind(&dto.category)
            .bind(&dto.unit)
            .bind(dto.min_price)
            .bind(dto.max_price)
            .bind(dto.modal_price)
            .bind(&dto.market_name)
            .bind(&dto.state)
            .bind(&dto.district)
            .bind(dto.date)
            .bind(dto.is_approved.unwrap_or(true))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error creating market price");
                AppError::from(e)
            })?;

        info!(price.id = %price.id, commodity = %price.commodity_name, "Market price created");

        Ok(price)
    }

    /// Full replace. 404s when the entry is absent.
    #[instrument(skip(db, dto), fields(price.id = %id, db.operation = "UPDATE", db.table = "market_prices"))]
    pub async fn update_price(
        db: &PgPool,
        id: Uuid,
        dto: MarketPriceDto,
    ) -> Result<MarketPrice, AppError> {
        let current = Self::get_price(db, id).await?;

        let sql = format!(
            "UPDATE market_prices SET commodity_name = $2, category = $3, unit = $4, \
             min_price = $5, max_price = $6, modal_price = $7, market_name = $8, state = $9, \
             district = $10, date = $11, is_approved = $12, updated_at = NOW() \
             WHERE id = $1 RETURNING {PRICE_COLUMNS}"
        );

        let price = sqlx::query_as::<_, MarketPrice>(&sql)
            .bind(id)
            .bind(&dto.commodity_name)
            .bind(&dto.category)
            .bind(&dto.unit)
            .bind(dto.min_price)
            .bind(dto.max_price)
            .bind(dto.modal_price)
            .bind(&dto.market_name)
            .bind(&dto.state)
            .bind(&dto.district)
            .bind(dto.date)
            .bind(dto.is_approved.unwrap_or(current.is_approved))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, price.id = %id, "Database error updating market price");
                AppError::from(e)
            })?;

        info!(price.id = %price.id, "Market price updated");

        Ok(price)
    }

    #[instrument(skip(db), fields(price.id = %id, db.operation = "DELETE", db.table = "market_prices"))]
    pub async fn delete_price(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::get_price(db, id).await?;

        sqlx::query("DELETE FROM market_prices WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, price.id = %id, "Database error deleting market price");
                AppError::from(e)
            })?;

        info!(price.id = %id, "Market price deleted");

        Ok(())
    }
}
