mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_username};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use krushimitra::config::cors::CorsConfig;
use krushimitra::config::jwt::JwtConfig;
use krushimitra::config::weather::WeatherConfig;
use krushimitra::modules::auth::model::Claims;
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

#[sqlx::test(migrations = "./migrations")]
async fn test_register_farmer_success(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let username = generate_unique_username();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "email": format!("{}@test.com", username),
                "password": "testpass123",
                "first_name": "Rajesh",
                "last_name": "Patel",
                "role": "farmer"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(body.get("token").is_some());
    assert_eq!(body["user"]["username"], username);
    assert_eq!(body["user"]["role"], "farmer");
    assert_eq!(body["user"]["is_approved"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_expert_starts_unapproved(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let username = generate_unique_username();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "email": format!("{}@test.com", username),
                "password": "testpass123",
                "first_name": "Priya",
                "last_name": "Sharma",
                "role": "expert"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["user"]["role"], "expert");
    assert_eq!(body["user"]["is_approved"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_admin_role_rejected(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let username = generate_unique_username();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "email": format!("{}@test.com", username),
                "password": "testpass123",
                "first_name": "Not",
                "last_name": "Allowed",
                "role": "admin"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_username_conflict(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let existing = create_test_user(&mut tx, &generate_unique_username(), "testpass123", UserRole::Farmer).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": existing.username,
                "email": "other@test.com",
                "password": "testpass123",
                "first_name": "Test",
                "last_name": "User",
                "role": "farmer"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let username = generate_unique_username();
    let password = "testpass123";
    create_test_user(&mut tx, &username, password, UserRole::Farmer).await;

    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

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

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(body.get("token").is_some());
    assert_eq!(body["user"]["username"], username);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let username = generate_unique_username();
    create_test_user(&mut tx, &username, "rightpass", UserRole::Farmer).await;

    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": "wrongpass"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["kind"], "invalid_credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_username(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": "nobody-here",
                "password": "whatever123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_disabled_account(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let username = generate_unique_username();
    let password = "testpass123";
    let user = create_test_user(&mut tx, &username, password, UserRole::Farmer).await;

    sqlx::query("UPDATE users SET enabled = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .unwrap();

    tx.commit().await.unwrap();

    let app = setup_test_app(pool).await;

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

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["kind"], "account_disabled");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_password(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": "someone"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_empty_username_unprocessable(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": "",
                "password": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_issued_token_authenticates_requests(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let username = generate_unique_username();
    let password = "testpass123";
    create_test_user(&mut tx, &username, password, UserRole::Farmer).await;

    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let login = Request::builder()
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

    let response = app.oneshot(login).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["username"], username);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_garbage_token_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", "Bearer not.a.real.token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_token_is_rejected(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();

    let username = generate_unique_username();
    create_test_user(&mut tx, &username, "testpass123", UserRole::Farmer).await;

    tx.commit().await.unwrap();

    dotenvy::dotenv().ok();
    let jwt_config = JwtConfig::from_env();

    // Correctly signed, but expired well past the validation leeway.
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: username,
        exp: now - 3600,
        iat: now - 7200,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .unwrap();

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The body does not say why the token failed; the request is simply
    // anonymous and the protected route rejects it.
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["kind"], "unauthenticated");
}
