//! Record stores.
//!
//! # Database: `mediscreen`
//!
//! ## Tables (schema `abernathyclinic_mediscreen`)
//!
//! - `patients` - Clinic patients
//! - `users` - Application users
//!
//! The reference DDL lives in `crates/service/sql/schema.sql`. Provisioning
//! and migrating the database is left to the deployment.
//!
//! # Stores
//!
//! Handlers only see the [`RecordStore`] trait. [`PatientRepository`] and
//! [`UserRepository`] implement it over `PostgreSQL`; [`MemoryStore`] keeps
//! records in process for tests and local runs.

pub mod memory;
pub mod patients;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use mediscreen_core::Record;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::MemoryStore;
pub use patients::PatientRepository;
pub use users::UserRepository;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The record was never saved, so there is no row to act on.
    #[error("{0} record has no identifier")]
    MissingId(&'static str),
}

/// Persistence for one record kind.
///
/// Every method is a single attempt; none of them retry.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Fetch a record by identifier. Absence is not an error.
    async fn find_by_id(&self, id: R::Id) -> Result<Option<R>, RepositoryError>;

    /// Fetch a record by exact `(last_name, first_name)`.
    ///
    /// The pair is not unique. When several records match, whichever the store
    /// yields first is returned.
    async fn find_by_name(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Option<R>, RepositoryError>;

    /// Fetch every record, unpaginated.
    async fn find_all(&self) -> Result<Vec<R>, RepositoryError>;

    /// Insert a record without an identifier (assigning a new one), or
    /// overwrite the stored record with the same identifier.
    async fn save(&self, record: R) -> Result<R, RepositoryError>;

    /// Remove the stored record with this record's identifier.
    async fn delete(&self, record: &R) -> Result<(), RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the connectivity probe shared by both repositories.
async fn ping_pool(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
