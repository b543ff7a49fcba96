use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::modules::schemes::model::{GovernmentScheme, GovernmentSchemeDto};
use crate::utils::errors::AppError;

const SCHEME_COLUMNS: &str = "id, title, description, category, eligibility, benefits, \
     application_process, documents_required, contact_info, website, deadline, is_active, \
     is_approved, created_at, updated_at";

pub struct SchemeService;

impl SchemeService {
    /// Active, approved schemes for the public feed, newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "government_schemes"))]
    pub async fn get_public_schemes(db: &PgPool) -> Result<Vec<GovernmentScheme>, AppError> {
        let sql = format!(
            "SELECT {SCHEME_COLUMNS} FROM government_schemes \
             WHERE is_active = TRUE AND is_approved = TRUE ORDER BY created_at DESC"
        );

        let schemes = sqlx::query_as::<_, GovernmentScheme>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching public schemes");
                AppError::from(e)
            })?;

        Ok(schemes)
    }

    /// Every scheme regardless of state. Admin surface.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "government_schemes"))]
    pub async fn get_all_schemes(db: &PgPool) -> Result<Vec<GovernmentScheme>, AppError> {
        let sql =
            format!("SELECT {SCHEME_COLUMNS} FROM government_schemes ORDER BY created_at DESC");

        let schemes = sqlx::query_as::<_, GovernmentScheme>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching all schemes");
                AppError::from(e)
            })?;

        Ok(schemes)
    }

    #[instrument(skip(db), fields(scheme.id = %id, db.operation = "SELECT", db.table = "government_schemes"))]
    pub async fn get_scheme(db: &PgPool, id: Uuid) -> Result<GovernmentScheme, AppError> {
        let sql = format!("SELECT {SCHEME_COLUMNS} FROM government_schemes WHERE id = $1");

        let scheme = sqlx::query_as::<_, GovernmentScheme>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, scheme.id = %id, "Database error fetching scheme");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Government scheme not found")))?;

        Ok(scheme)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "government_schemes"))]
    pub async fn get_schemes_by_category(
        db: &PgPool,
        category: &str,
    ) -> Result<Vec<GovernmentScheme>, AppError> {
        let sql = format!(
            "SELECT {SCHEME_COLUMNS} FROM government_schemes \
             WHERE category = $1 AND is_active = TRUE AND is_approved = TRUE \
             ORDER BY created_at DESC"
        );

        let schemes = sqlx::query_as::<_, GovernmentScheme>(&sql)
            .bind(category)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, category = %category, "Database error fetching schemes");
                AppError::from(e)
            })?;

        Ok(schemes)
    }

    /// Case-insensitive substring search over title and description,
    /// restricted to active approved schemes.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "government_schemes"))]
    pub async fn search_schemes(
        db: &PgPool,
        query: &str,
    ) -> Result<Vec<GovernmentScheme>, AppError> {
        let sql = format!(
            "SELECT {SCHEME_COLUMNS} FROM government_schemes \
             WHERE (title ILIKE $1 OR description ILIKE $1) \
             AND is_active = TRUE AND is_approved = TRUE ORDER BY created_at DESC"
        );

        let schemes = sqlx::query_as::<_, GovernmentScheme>(&sql)
            .bind(format!("%{query}%"))
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error searching schemes");
                AppError::from(e)
            })?;

        Ok(schemes)
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "government_schemes"))]
    pub async fn create_scheme(
        db: &PgPool,
        dto: GovernmentSchemeDto,
    ) -> Result<GovernmentScheme, AppError> {
        let sql = format!(
            "INSERT INTO government_schemes (title, description, category, eligibility, \
             benefits, application_process, documents_required, contact_info, website, \
             deadline, is_active, is_approved) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {SCHEME_COLUMNS}"
        );

        let scheme = sqlx::query_as::<_, GovernmentScheme>(&sql)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.category)
            .bind(&dto.eligibility)
            .bind(&dto.benefits)
            .bind(&dto.application_process)
            .bind(&dto.documents_required)
            .bind(&dto.contact_info)
            .bind(&dto.website)
            .bind(&dto.deadline)
            .bind(dto.is_active.unwrap_or(true))
            .bind(dto.is_approved.unwrap_or(true))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error creating scheme");
                AppError::from(e)
            })?;

        info!(scheme.id = %scheme.id, scheme.title = %scheme.title, "Government scheme created");

        Ok(scheme)
    }

    /// Full replace. 404s when the scheme is absent.
    #[instrument(skip(db, dto), fields(scheme.id = %id, db.operation = "UPDATE", db.table = "government_schemes"))]
    pub async fn update_scheme(
        db: &PgPool,
        id: Uuid,
        dto: GovernmentSchemeDto,
    ) -> Result<GovernmentScheme, AppError> {
        let current = Self::get_scheme(db, id).await?;

        let sql = format!(
            "UPDATE government_schemes SET title = $2, description = $3, category = $4, \
             eligibility = $5, benefits = $6, application_process = $7, \
             documents_required = $8, contact_info = $9, website = $10, deadline = $11, \
             is_active = $12, is_approved = $13, updated_at = NOW() \
             WHERE id = $1 RETURNING {SCHEME_COLUMNS}"
        );

        let scheme = sqlx::query_as::<_, GovernmentScheme>(&sql)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.category)
            .bind(&dto.eligibility)
            .bind(&dto.benefits)
            .bind(&dto.application_process)
            .bind(&dto.documents_required)
            .bind(&dto.contact_info)
            .bind(&dto.website)
            .bind(&dto.deadline)
            .bind(dto.is_active.unwrap_or(current.is_active))
            .bind(dto.is_approved.unwrap_or(current.is_approved))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, scheme.id = %id, "Database error updating scheme");
                AppError::from(e)
            })?;

        info!(scheme.id = %scheme.id, "Government scheme updated");

        Ok(scheme)
    }

    #[instrument(skip(db), fields(scheme.id = %id, db.operation = "DELETE", db.table = "government_schemes"))]
    pub async fn delete_scheme(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::get_scheme(db, id).await?;

        sqlx::query("DELETE FROM government_schemes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, scheme.id = %id, "Database error deleting scheme");
                AppError::from(e)
            })?;

        info!(scheme.id = %id, "Government scheme deleted");

        Ok(())
    }
}
