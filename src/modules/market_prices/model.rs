use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A mandi price observation for one commodity on one day.
#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct MarketPrice {
    pub id: Uuid,
    pub commodity_name: String,
    pub category: Option<String>,
    pub unit: String,
    pub min_price: f64,
    pub max_price: f64,
    pub modal_price: f64,
    pub market_name: String,
    pub state: String,
    pub district: Option<String>,
    pub date: NaiveDate,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a price entry and for full updates.
#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct MarketPriceDto {
    #[validate(length(min = 1, max = 100, message = "Commodity name is required"))]
    pub commodity_name: String,
    pub category: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Unit is required"))]
    pub unit: String,
    pub min_price: f64,
    pub max_price: f64,
    pub modal_price: f64,
    #[validate(length(min = 1, max = 100, message = "Market name is required"))]
    pub market_name: String,
    #[validate(length(min = 1, max = 100, message = "State is required"))]
    pub state: String,
    pub district: Option<String>,
    pub date: NaiveDate,
    pub is_approved: Option<bool>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct PriceListParams {
    pub commodity_name: Option<String>,
}
