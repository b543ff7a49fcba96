mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_listing, create_test_user, generate_unique_username};
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

#[sqlx::test(migrations = "./migrations")]
async fn test_farmer_creates_listing(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/product-listings")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "product_name": "Basmati Rice",
                "category": "Grains",
                "quantity": 500.0,
                "unit": "kg",
                "price": 85.0,
                "location": "Pune"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["farmer_id"], farmer.id.to_string());
    assert_eq!(body["product_name"], "Basmati Rice");
    assert_eq!(body["is_available"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expert_cannot_create_listing(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let expert = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Expert).await;
    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &expert.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/product-listings")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "product_name": "Advice by the kilo",
                "quantity": 1.0,
                "unit": "kg",
                "price": 10.0
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_negative_price_rejected(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/product-listings")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "product_name": "Tomatoes",
                "quantity": 20.0,
                "unit": "kg",
                "price": -5.0
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_marketplace_hides_unapproved(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    create_test_listing(&mut tx, farmer.id, "Visible Wheat").await;
    let hidden = create_test_listing(&mut tx, farmer.id, "Hidden Wheat").await;

    sqlx::query("UPDATE product_listings SET is_approved = FALSE WHERE id = $1")
        .bind(hidden)
        .execute(&mut *tx)
        .await
        .unwrap();

    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/product-listings/public")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["product_name"].as_str().unwrap())
        .collect();

    assert!(names.contains(&"Visible Wheat"));
    assert!(!names.contains(&"Hidden Wheat"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_listings_includes_unapproved(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let hidden = create_test_listing(&mut tx, farmer.id, "Own Hidden Listing").await;

    sqlx::query("UPDATE product_listings SET is_approved = FALSE WHERE id = $1")
        .bind(hidden)
        .execute(&mut *tx)
        .await
        .unwrap();

    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/product-listings")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["product_name"].as_str().unwrap())
        .collect();

    // Owners see their whole inventory, moderation state included.
    assert!(names.contains(&"Own Hidden Listing"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_listings_requires_farmer(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let expert = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Expert).await;
    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &expert.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/product-listings")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_listing_by_non_owner_forbidden(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let owner = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let intruder = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let listing = create_test_listing(&mut tx, owner.id, "Owner Produce").await;

    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &intruder.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/product-listings/{}", listing))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "product_name": "Stolen Produce",
                "quantity": 1.0,
                "unit": "kg",
                "price": 1.0
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_preserves_moderation_state(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let listing = create_test_listing(&mut tx, farmer.id, "Fresh Onions").await;

    sqlx::query("UPDATE product_listings SET is_approved = FALSE WHERE id = $1")
        .bind(listing)
        .execute(&mut *tx)
        .await
        .unwrap();

    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    // A farmer cannot sneak a listing back into the marketplace through
    // an update body.
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/product-listings/{}", listing))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "product_name": "Fresh Onions",
                "quantity": 50.0,
                "unit": "kg",
                "price": 30.0,
                "is_approved": true
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["is_approved"], false);
    assert_eq!(body["quantity"], 50.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_approves_listing(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let admin = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Admin).await;
    let listing = create_test_listing(&mut tx, farmer.id, "Pending Mangoes").await;

    sqlx::query("UPDATE product_listings SET is_approved = FALSE WHERE id = $1")
        .bind(listing)
        .execute(&mut *tx)
        .await
        .unwrap();

    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &admin.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/product-listings/{}/approve", listing))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["is_approved"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_farmer_cannot_approve_listing(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let listing = create_test_listing(&mut tx, farmer.id, "Self Approved").await;

    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/product-listings/{}/approve", listing))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_listing_by_owner(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    let listing = create_test_listing(&mut tx, farmer.id, "Short Lived").await;

    tx.commit().await.unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()).await, &farmer.username, "testpass123").await;
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/product-listings/{}", listing))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_listings WHERE id = $1")
        .bind(listing)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_matches_case_insensitively(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let farmer = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    create_test_listing(&mut tx, farmer.id, "Alphonso Mangoes").await;

    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/product-listings/search?product_name=mango")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["product_name"], "Alphonso Mangoes");
}
