use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Crop {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub season: String,
    pub soil_type: Option<String>,
    pub climate: Option<String>,
    pub water_requirement: Option<String>,
    pub growth_duration: Option<String>,
    pub yield_per_hectare: Option<String>,
    pub market_price: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a crop and for full updates.
#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct CropDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Season must be between 1 and 50 characters"))]
    pub season: String,
    pub soil_type: Option<String>,
    pub climate: Option<String>,
    pub water_requirement: Option<String>,
    pub growth_duration: Option<String>,
    pub yield_per_hectare: Option<String>,
    pub market_price: Option<String>,
    pub image_url: Option<String>,
}

/// Query parameters for the recommendation endpoint. Season and soil type
/// match exactly; climate narrows the result when given.
#[derive(Deserialize, Debug, ToSchema)]
pub struct RecommendationParams {
    pub season: String,
    pub soil_type: String,
    pub climate: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchParams {
    pub query: String,
}
