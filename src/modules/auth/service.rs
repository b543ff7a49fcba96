use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::{USER_COLUMNS, UserService};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{AuthResponse, LoginRequest, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username, role = ?dto.role))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequestDto,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        // Admin accounts are created through the CLI, never over the API.
        if dto.role == UserRole::Admin {
            warn!(username = %dto.username, "Registration attempted with admin role");
            return Err(AppError::bad_request(anyhow!(
                "Admin accounts cannot be created through registration"
            )));
        }

        let username_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(&dto.username)
                .fetch_one(db)
                .await?;

        if username_taken {
            warn!(username = %dto.username, "Registration with existing username");
            return Err(AppError::conflict(anyhow!("Username already exists")));
        }

        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&dto.email)
                .fetch_one(db)
                .await?;

        if email_taken {
            warn!(email = %dto.email, "Registration with existing email");
            return Err(AppError::conflict(anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        // Experts start unapproved and are cleared by an admin before they
        // can answer.
        let is_approved = dto.role != UserRole::Expert;

        let sql = format!(
            "INSERT INTO users (username, email, password, first_name, last_name, role, is_approved) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&dto.username)
            .bind(&dto.email)
            .bind(&hashed_password)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(dto.role)
            .bind(is_approved)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow!("Username or email already exists"));
                }
                AppError::from(e)
            })?;

        info!(user.id = %user.id, username = %user.username, "User registered");

        let token = create_access_token(&user.username, jwt_config)?;

        Ok(AuthResponse { token, user })
    }

    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct CredentialRow {
            id: Uuid,
            password: String,
            enabled: bool,
        }

        let credential = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, password, enabled FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::invalid_credentials(anyhow!("Invalid username or password")))?;

        if !verify_password(&dto.password, &credential.password)? {
            warn!(username = %dto.username, "Login with wrong password");
            return Err(AppError::invalid_credentials(anyhow!(
                "Invalid username or password"
            )));
        }

        if !credential.enabled {
            warn!(username = %dto.username, "Login on disabled account");
            return Err(AppError::account_disabled(anyhow!("Account is disabled")));
        }

        let user = UserService::get_user(db, credential.id).await?;
        let token = create_access_token(&user.username, jwt_config)?;

        info!(user.id = %user.id, "User logged in");

        Ok(AuthResponse { token, user })
    }
}
