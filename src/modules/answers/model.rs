use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An expert's answer to a farmer's question.
///
/// At most one answer per question carries `is_accepted`, enforced in the
/// acceptance transaction and backed by a partial unique index.
#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub expert_id: Uuid,
    pub content: String,
    pub is_accepted: bool,
    pub is_approved: bool,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct CreateAnswerDto {
    pub question_id: Uuid,
    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: String,
}

/// Acceptance is not part of this surface; it only moves through the
/// dedicated accept operation.
#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct UpdateAnswerDto {
    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: Option<String>,
    pub is_approved: Option<bool>,
}
