use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::{debug, warn};

use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Resolves the bearer token on a request to an account, if any.
///
/// Failures never abort the request here. A missing header, a bad or
/// expired token and an unknown subject all leave the request anonymous,
/// and the policy layer decides what an anonymous caller may do. Each
/// failure is logged with its cause.
async fn authenticate(parts: &Parts, state: &AppState) -> Option<User> {
    let header_value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header_value.strip_prefix("Bearer ")?;

    let claims = match verify_token(token, &state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(kind = ?e.kind, "Rejected bearer token");
            return None;
        }
    };

    match UserService::find_by_username(&state.db, &claims.sub).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            warn!(
                subject = %claims.sub,
                "Token subject does not resolve to an active account"
            );
            None
        }
        Err(e) => {
            warn!(error = %e.error, "Failed to resolve token subject");
            None
        }
    }
}

/// Extractor carrying the account behind the request when a valid token
/// was presented, `None` otherwise. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(authenticate(parts, state).await))
    }
}

/// Extractor that demands an authenticated account.
///
/// Anonymous requests are rejected with 401. Why a request ended up
/// anonymous (absent header, invalid or expired token, unknown subject)
/// is visible in the logs, not in the response body.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
            .await
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthenticated(anyhow!("Authentication required")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cors::CorsConfig;
    use crate::config::jwt::JwtConfig;
    use crate::config::weather::WeatherConfig;
    use axum::http::Request;
    use sqlx::PgPool;

    fn test_state() -> AppState {
        AppState {
            db: PgPool::connect_lazy("postgres://localhost/krushimitra_test").unwrap(),
            jwt_config: JwtConfig {
                secret: "test-secret".to_string(),
                access_token_expiry: 3600,
            },
            cors_config: CorsConfig {
                allowed_origins: vec![],
            },
            weather_config: WeatherConfig {
                api_key: String::new(),
                base_url: String::new(),
            },
            http: reqwest::Client::new(),
        }
    }

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_missing_header_is_anonymous() {
        let state = test_state();
        let mut parts = parts_with_header(None);

        let MaybeUser(user) = MaybeUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_anonymous() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));

        let MaybeUser(user) = MaybeUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_garbage_token_is_anonymous() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Bearer not.a.token"));

        let MaybeUser(user) = MaybeUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_current_user_rejects_anonymous() {
        let state = test_state();
        let mut parts = parts_with_header(None);

        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_current_user_rejects_invalid_token() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Bearer invalid"));

        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.kind, crate::utils::errors::ErrorKind::Unauthenticated);
    }
}
