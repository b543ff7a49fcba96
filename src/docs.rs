use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::answers::model::{Answer, CreateAnswerDto, UpdateAnswerDto};
use crate::modules::auth::model::{
    AuthResponse, ErrorResponse, LoginRequest, RegisterRequestDto,
};
use crate::modules::crops::model::{Crop, CropDto, RecommendationParams, SearchParams};
use crate::modules::listings::model::{ListingSearchParams, ProductListing, ProductListingDto};
use crate::modules::market_prices::model::{MarketPrice, MarketPriceDto, PriceListParams};
use crate::modules::questions::model::{CreateQuestionDto, Question, UpdateQuestionDto};
use crate::modules::schemes::model::{GovernmentScheme, GovernmentSchemeDto};
use crate::modules::users::model::{UpdateProfileDto, User, UserRole};
use crate::modules::weather::model::WeatherReport;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me,
        crate::modules::users::controller::get_experts,
        crate::modules::users::controller::approve_user,
        crate::modules::questions::controller::get_public_questions,
        crate::modules::questions::controller::get_questions,
        crate::modules::questions::controller::get_unresolved_questions,
        crate::modules::questions::controller::get_question,
        crate::modules::questions::controller::create_question,
        crate::modules::questions::controller::update_question,
        crate::modules::questions::controller::delete_question,
        crate::modules::answers::controller::get_answers_by_question,
        crate::modules::answers::controller::get_answers_by_expert,
        crate::modules::answers::controller::create_answer,
        crate::modules::answers::controller::update_answer,
        crate::modules::answers::controller::accept_answer,
        crate::modules::answers::controller::delete_answer,
        crate::modules::crops::controller::get_crops,
        crate::modules::crops::controller::get_crop,
        crate::modules::crops::controller::get_crops_by_season,
        crate::modules::crops::controller::get_crops_by_soil_type,
        crate::modules::crops::controller::get_crops_by_climate,
        crate::modules::crops::controller::search_crops,
        crate::modules::crops::controller::get_crop_recommendations,
        crate::modules::crops::controller::create_crop,
        crate::modules::crops::controller::update_crop,
        crate::modules::crops::controller::delete_crop,
        crate::modules::market_prices::controller::get_market_prices,
        crate::modules::market_prices::controller::get_market_price,
        crate::modules::market_prices::controller::get_prices_by_commodity,
        crate::modules::market_prices::controller::get_prices_by_state,
        crate::modules::market_prices::controller::get_commodities,
        crate::modules::market_prices::controller::create_market_price,
        crate::modules::market_prices::controller::update_market_price,
        crate::modules::market_prices::controller::delete_market_price,
        crate::modules::schemes::controller::get_public_schemes,
        crate::modules::schemes::controller::get_all_schemes,
        crate::modules::schemes::controller::get_scheme,
        crate::modules::schemes::controller::get_schemes_by_category,
        crate::modules::schemes::controller::search_schemes,
        crate::modules::schemes::controller::create_scheme,
        crate::modules::schemes::controller::update_scheme,
        crate::modules::schemes::controller::delete_scheme,
        crate::modules::listings::controller::get_public_listings,
        crate::modules::listings::controller::get_my_listings,
        crate::modules::listings::controller::get_listing,
        crate::modules::listings::controller::get_listings_by_category,
        crate::modules::listings::controller::search_listings,
        crate::modules::listings::controller::create_listing,
        crate::modules::listings::controller::update_listing,
        crate::modules::listings::controller::delete_listing,
        crate::modules::listings::controller::approve_listing,
        crate::modules::weather::controller::get_current_weather,
    ),
    components(
        schemas(
            User,
            UserRole,
            UpdateProfileDto,
            RegisterRequestDto,
            LoginRequest,
            AuthResponse,
            ErrorResponse,
            Question,
            CreateQuestionDto,
            UpdateQuestionDto,
            Answer,
            CreateAnswerDto,
            UpdateAnswerDto,
            Crop,
            CropDto,
            SearchParams,
            RecommendationParams,
            MarketPrice,
            MarketPriceDto,
            PriceListParams,
            GovernmentScheme,
            GovernmentSchemeDto,
            ProductListing,
            ProductListingDto,
            ListingSearchParams,
            WeatherReport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profiles, expert directory, and admin user management"),
        (name = "Questions", description = "Farmer questions"),
        (name = "Answers", description = "Expert answers and acceptance"),
        (name = "Crops", description = "Crop catalog and recommendations"),
        (name = "Market Prices", description = "Mandi price observations"),
        (name = "Government Schemes", description = "Support scheme catalog"),
        (name = "Product Listings", description = "Farmer produce marketplace"),
        (name = "Weather", description = "Current weather proxy")
    ),
    info(
        title = "Krushimitra API",
        version = "0.1.0",
        description = "Farmer advisory platform REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        contact(
            name = "API Support",
            email = "support@krushimitra.com"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
