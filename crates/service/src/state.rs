//! Application state shared across handlers.

use std::sync::Arc;

use mediscreen_core::{Patient, Record, User};
use sqlx::PgPool;

use crate::db::{MemoryStore, PatientRepository, RecordStore, RepositoryError, UserRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and holds one store per record
/// kind. Handlers reach the right store through [`HasStore`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    patients: Arc<dyn RecordStore<Patient>>,
    users: Arc<dyn RecordStore<User>>,
}

impl AppState {
    /// Create a state over arbitrary stores.
    #[must_use]
    pub fn new(
        patients: Arc<dyn RecordStore<Patient>>,
        users: Arc<dyn RecordStore<User>>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner { patients, users }),
        }
    }

    /// Create a state backed by `PostgreSQL` repositories sharing one pool.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PatientRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool)),
        )
    }

    /// Create a state backed by empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Patient>::new()),
            Arc::new(MemoryStore::<User>::new()),
        )
    }

    /// Get the patient store.
    #[must_use]
    pub fn patients(&self) -> &dyn RecordStore<Patient> {
        self.inner.patients.as_ref()
    }

    /// Get the user store.
    #[must_use]
    pub fn users(&self) -> &dyn RecordStore<User> {
        self.inner.users.as_ref()
    }

    /// Check that every store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the first store's connectivity error.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.patients().ping().await?;
        self.users().ping().await
    }
}

/// Access to the store for record kind `R`.
pub trait HasStore<R: Record> {
    /// Get the store holding records of kind `R`.
    fn store(&self) -> &dyn RecordStore<R>;
}

impl HasStore<Patient> for AppState {
    fn store(&self) -> &dyn RecordStore<Patient> {
        self.patients()
    }
}

impl HasStore<User> for AppState {
    fn store(&self) -> &dyn RecordStore<User> {
        self.users()
    }
}
