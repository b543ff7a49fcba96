use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::answers::router::init_answers_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::crops::router::init_crops_router;
use crate::modules::listings::router::init_listings_router;
use crate::modules::market_prices::router::init_market_prices_router;
use crate::modules::questions::router::init_questions_router;
use crate::modules::schemes::router::init_schemes_router;
use crate::modules::users::router::init_users_router;
use crate::modules::weather::router::init_weather_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Assembles the application router.
///
/// Role and ownership checks live in the handlers, behind the policy
/// table; routing stays free of per-route security layers.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router())
                .nest("/questions", init_questions_router())
                .nest("/answers", init_answers_router())
                .nest("/crops", init_crops_router())
                .nest("/market-prices", init_market_prices_router())
                .nest("/government-schemes", init_schemes_router())
                .nest("/product-listings", init_listings_router())
                .nest("/weather", init_weather_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
