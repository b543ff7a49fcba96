//! Database configuration and connection pool initialization.
//!
//! The PostgreSQL connection pool is created from the `DATABASE_URL`
//! environment variable and shared across the application through
//! [`crate::state::AppState`].
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//!
//! # Panics
//!
//! [`init_db_pool`] panics when `DATABASE_URL` is unset or the database
//! is unreachable. Startup is the only caller, so a missing database
//! stops the process before it can serve requests.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// The returned [`PgPool`] is cheaply cloneable and is stored in the
/// application state for use by every service.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
