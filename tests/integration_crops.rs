mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_username};
use http_body_util::BodyExt;
use krushimitra::config::cors::CorsConfig;
use krushimitra::config::jwt::JwtConfig;
use krushimitra::config::weather::WeatherConfig;
use krushimitra::modules::users::model::UserRole;
use krushimitra::router::init_router;
use krushimitra::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        weather_config: WeatherConfig::from_env(),
        http: reqwest::Client::new(),
    };
    init_router(state)
}

async fn get_auth_token(app: axum::Router, username: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn seed_crop(pool: &PgPool, name: &str, season: &str, soil: &str, climate: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO crops (name, description, season, soil_type, climate)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(name)
    .bind(format!("{} grown in test fields", name))
    .bind(season)
    .bind(soil)
    .bind(climate)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_crops_readable_without_token(pool: PgPool) {
    seed_crop(&pool, "Rice", "Kharif", "Clay", "Tropical").await;

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/crops")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Rice");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_crop(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Admin).await;
    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &admin.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/crops")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Sugarcane",
                "season": "Annual",
                "soil_type": "Loamy",
                "water_requirement": "High",
                "market_price": "₹350 per quintal"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["name"], "Sugarcane");
    assert_eq!(body["water_requirement"], "High");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_farmer_cannot_create_crop(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/crops")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Unauthorized Crop",
                "season": "Kharif"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_crops_by_season(pool: PgPool) {
    seed_crop(&pool, "Rice", "Kharif", "Clay", "Tropical").await;
    seed_crop(&pool, "Wheat", "Rabi", "Loamy", "Temperate").await;

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/crops/season/Kharif")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Rice");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_covers_name_and_description(pool: PgPool) {
    seed_crop(&pool, "Mustard", "Rabi", "Loamy", "Temperate").await;
    seed_crop(&pool, "Maize", "Kharif", "Loamy", "Subtropical").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/crops/search?query=mustard")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Descriptions are searched too; every seeded crop mentions "test
    // fields" there.
    let app = setup_test_app(pool).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/crops/search?query=test%20fields")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_recommendations_filter_by_season_and_soil(pool: PgPool) {
    seed_crop(&pool, "Rice", "Kharif", "Clay", "Tropical").await;
    seed_crop(&pool, "Maize", "Kharif", "Loamy", "Subtropical").await;
    seed_crop(&pool, "Wheat", "Rabi", "Loamy", "Temperate").await;

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/crops/recommendations?season=Kharif&soil_type=Clay")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Rice");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_recommendations_narrow_with_climate(pool: PgPool) {
    seed_crop(&pool, "Rice", "Kharif", "Clay", "Tropical").await;
    seed_crop(&pool, "Cotton", "Kharif", "Clay", "Arid").await;

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/crops/recommendations?season=Kharif&soil_type=Clay&climate=tropical")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Rice");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_crop_replaces_document(pool: PgPool) {
    let crop_id = seed_crop(&pool, "Watermelon", "Zaid", "Sandy", "Hot").await;

    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Admin).await;
    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &admin.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    // Catalog updates are whole-document: fields left out of the body
    // are cleared, not kept.
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/crops/{}", crop_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Watermelon",
                "season": "Zaid",
                "water_requirement": "Very High"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["water_requirement"], "Very High");
    assert!(body["soil_type"].is_null());
    assert!(body["climate"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_crop_admin_only(pool: PgPool) {
    let crop_id = seed_crop(&pool, "Doomed Crop", "Kharif", "Clay", "Tropical").await;

    let mut tx = pool.begin().await.unwrap();
    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let admin = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Admin).await;
    tx.commit().await.unwrap();

    let farmer_token =
        get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/crops/{}", crop_id))
        .header("authorization", format!("Bearer {}", farmer_token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token =
        get_auth_token(setup_test_app(pool.clone()).await, &admin.username, "testpass123").await;

    let app = setup_test_app(pool).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/crops/{}", crop_id))
        .header("authorization", format!("Bearer {}", admin_token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_unknown_crop_not_found(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/crops/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
