use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A farmer's produce listing on the marketplace.
#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct ProductListing {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub product_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub is_approved: bool,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a listing and for full updates. Moderation state
/// is not part of this surface; admins flip it through the approve
/// operation.
#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct ProductListingDto {
    #[validate(length(min = 1, max = 100, message = "Product name is required"))]
    pub product_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
    pub quantity: f64,
    #[validate(length(min = 1, max = 50, message = "Unit is required"))]
    pub unit: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ListingSearchParams {
    pub product_name: String,
}
