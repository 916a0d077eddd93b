//! User repository for `PostgreSQL`.
//!
//! Mirrors the patient repository; only the table and the `sex` column differ.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use mediscreen_core::{User, UserId, Record};

use super::{RecordStore, RepositoryError, ping_pool};

#[derive(Debug, FromRow)]
struct UserRow {
    uuid: UserId,
    last_name: String,
    first_name: String,
    date_of_birth: String,
    sex: String,
    home_address: Option<String>,
    phone_number: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            uuid: Some(row.uuid),
            last_name: row.last_name,
            first_name: row.first_name,
            date_of_birth: row.date_of_birth,
            sex: row.sex,
            home_address: row.home_address,
            phone_number: row.phone_number,
        }
    }
}

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<User> for UserRepository {
    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT uuid, last_name, first_name, date_of_birth, sex, home_address, phone_number
            FROM abernathyclinic_mediscreen.users
            WHERE uuid = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Option<User>, RepositoryError> {
        // No ORDER BY: duplicates resolve to whichever row Postgres returns first.
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT uuid, last_name, first_name, date_of_birth, sex, home_address, phone_number
            FROM abernathyclinic_mediscreen.users
            WHERE last_name = $1 AND first_name = $2
            LIMIT 1
            ",
        )
        .bind(last_name)
        .bind(first_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT uuid, last_name, first_name, date_of_birth, sex, home_address, phone_number
            FROM abernathyclinic_mediscreen.users
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, user), fields(id = ?user.uuid))]
    async fn save(&self, user: User) -> Result<User, RepositoryError> {
        let id = user.id().unwrap_or_else(User::new_id);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO abernathyclinic_mediscreen.users
                (uuid, last_name, first_name, date_of_birth, sex, home_address, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (uuid) DO UPDATE SET
                last_name = EXCLUDED.last_name,
                first_name = EXCLUDED.first_name,
                date_of_birth = EXCLUDED.date_of_birth,
                sex = EXCLUDED.sex,
                home_address = EXCLUDED.home_address,
                phone_number = EXCLUDED.phone_number
            RETURNING uuid, last_name, first_name, date_of_birth, sex, home_address, phone_number
            ",
        )
        .bind(id)
        .bind(&user.last_name)
        .bind(&user.first_name)
        .bind(&user.date_of_birth)
        .bind(&user.sex)
        .bind(&user.home_address)
        .bind(&user.phone_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self, user), fields(id = ?user.uuid))]
    async fn delete(&self, user: &User) -> Result<(), RepositoryError> {
        let id = user.id().ok_or(RepositoryError::MissingId(User::KIND))?;

        sqlx::query("DELETE FROM abernathyclinic_mediscreen.users WHERE uuid = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        ping_pool(&self.pool).await
    }
}
