use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct GovernmentScheme {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub eligibility: Option<String>,
    pub benefits: Option<String>,
    pub application_process: Option<String>,
    pub documents_required: Option<String>,
    pub contact_info: Option<String>,
    pub website: Option<String>,
    pub deadline: Option<String>,
    pub is_active: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a scheme and for full updates.
#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct GovernmentSchemeDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub category: Option<String>,
    pub eligibility: Option<String>,
    pub benefits: Option<String>,
    pub application_process: Option<String>,
    pub documents_required: Option<String>,
    pub contact_info: Option<String>,
    pub website: Option<String>,
    pub deadline: Option<String>,
    pub is_active: Option<bool>,
    pub is_approved: Option<bool>,
}
