//! Question data models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A farmer's question awaiting expert answers.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Question {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Option<String>,
    pub view_count: i32,
    pub is_resolved: bool,
    pub is_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionDto {
    #[validate(length(min = 5, max = 255))]
    pub title: String,
    #[validate(length(min = 10))]
    pub content: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub tags: Option<String>,
}

/// DTO for updating a question.
///
/// Resolution state is deliberately absent from this surface: it changes
/// only when the owner accepts an answer.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateQuestionDto {
    #[validate(length(min = 5, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 10))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub tags: Option<String>,
}
