//! Integration tests for the Mediscreen SQL service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a database and apply crates/service/sql/schema.sql, then
//! export MEDISCREEN_DATABASE_URL=postgres://localhost/mediscreen_test
//! cargo run -p mediscreen-service &
//!
//! cargo test -p mediscreen-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_patients`, `api_users` - HTTP tests against a running server
//! - `repositories` - `PostgreSQL` repository tests against a live database

use reqwest::Client;
use secrecy::SecretString;
use sqlx::PgPool;

/// Reference DDL shipped with the service.
pub const SCHEMA_SQL: &str = include_str!("../../service/sql/schema.sql");

/// Base URL for the service API (configurable via environment).
#[must_use]
pub fn service_base_url() -> String {
    std::env::var("MEDISCREEN_BASE_URL").unwrap_or_else(|_| "http://localhost:8081".to_string())
}

/// HTTP client for API tests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A last name no other test run will collide with.
#[must_use]
pub fn unique_last_name() -> String {
    // 2..=32 characters: "It" + 30 hex digits.
    let suffix: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(30)
        .collect();
    format!("It{suffix}")
}

/// Connect to the test database and make sure the schema exists.
///
/// # Panics
///
/// Panics if no database URL is configured or the database is unreachable.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("MEDISCREEN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("MEDISCREEN_DATABASE_URL or DATABASE_URL must be set");

    let pool = mediscreen_service::db::create_pool(&SecretString::from(url), 2)
        .await
        .expect("Failed to connect to test database");

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(&pool)
        .await
        .expect("Failed to apply schema");

    pool
}
