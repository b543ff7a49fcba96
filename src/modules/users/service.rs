use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::modules::users::model::{UpdateProfileDto, User};
use crate::utils::errors::AppError;

/// Column list shared by every query that loads a [`User`].
///
/// The password hash is stored in the same table but never selected here.
pub(crate) const USER_COLUMNS: &str = "id, username, email, first_name, last_name, role, \
     enabled, phone_number, address, city, state, pincode, farm_size, primary_crops, \
     expertise, qualifications, rating, total_answers, is_approved, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Resolves a token subject to an account.
    ///
    /// Disabled accounts resolve to `None`: possession of a valid token is
    /// not sufficient once the account has been switched off.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND enabled = TRUE");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error resolving username");
                AppError::from(e)
            })?;

        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_all_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");

        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching users");
                AppError::from(e)
            })?;

        debug!(count = %users.len(), "Users fetched");

        Ok(users)
    }

    #[instrument(skip(db), fields(user.id = %id, db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, user.id = %id, "Database error fetching user");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Ok(user)
    }

    /// Public directory of approved experts, best rated first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_approved_experts(db: &PgPool) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = 'expert' AND is_approved = TRUE AND enabled = TRUE \
             ORDER BY rating DESC"
        );

        let experts = sqlx::query_as::<_, User>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching experts");
                AppError::from(e)
            })?;

        Ok(experts)
    }

    /// Marks an account approved. Used for expert onboarding.
    #[instrument(skip(db), fields(user.id = %id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn approve_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users SET is_approved = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, user.id = %id, "Database error approving user");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        info!(user.id = %user.id, username = %user.username, "User approved");

        Ok(user)
    }

    /// Updates the caller's own profile fields. Absent fields keep their
    /// current values.
    #[instrument(skip(db, dto), fields(user.id = %id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let current = Self::get_user(db, id).await?;

        let sql = format!(
            "UPDATE users SET first_name = $2, last_name = $3, phone_number = $4, \
             address = $5, city = $6, state = $7, pincode = $8, farm_size = $9, \
             primary_crops = $10, expertise = $11, qualifications = $12, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(dto.first_name.unwrap_or(current.first_name))
            .bind(dto.last_name.unwrap_or(current.last_name))
            .bind(dto.phone_number.or(current.phone_number))
            .bind(dto.address.or(current.address))
            .bind(dto.city.or(current.city))
            .bind(dto.state.or(current.state))
            .bind(dto.pincode.or(current.pincode))
            .bind(dto.farm_size.or(current.farm_size))
            .bind(dto.primary_crops.or(current.primary_crops))
            .bind(dto.expertise.or(current.expertise))
            .bind(dto.qualifications.or(current.qualifications))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, user.id = %id, "Database error updating profile");
                AppError::from(e)
            })?;

        info!(user.id = %user.id, "Profile updated");

        Ok(user)
    }
}
