//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - Account entity as stored in the database (without the
//!   password hash)
//! - [`UserRole`] - The three account roles
//!
//! # Request DTOs
//!
//! - [`UpdateProfileDto`] - Update own profile fields

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Role assigned to an account at registration.
///
/// Admin passes every authorization rule. Farmer and Expert are granted
/// operations by the table in [`crate::middleware::policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Farmer,
    Expert,
}

/// An account in the system.
///
/// Farmers ask questions and list produce; experts answer once an admin
/// has approved them. The bcrypt hash is stored in the same table but
/// never travels through this type; credential checks read it separately.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub enabled: bool,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub farm_size: Option<String>,
    pub primary_crops: Option<String>,
    pub expertise: Option<String>,
    pub qualifications: Option<String>,
    pub rating: f64,
    pub total_answers: i32,
    pub is_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// DTO for updating own profile.
///
/// Only descriptive fields are editable here. Role, credentials and
/// expert approval are managed elsewhere.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub farm_size: Option<String>,
    pub primary_crops: Option<String>,
    pub expertise: Option<String>,
    pub qualifications: Option<String>,
}
