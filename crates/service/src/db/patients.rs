//! Patient repository for `PostgreSQL`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use mediscreen_core::{Patient, PatientId, Record};

use super::{RecordStore, RepositoryError, ping_pool};

#[derive(Debug, FromRow)]
struct PatientRow {
    uuid: PatientId,
    last_name: String,
    first_name: String,
    date_of_birth: String,
    gender: String,
    home_address: Option<String>,
    phone_number: Option<String>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Self {
            uuid: Some(row.uuid),
            last_name: row.last_name,
            first_name: row.first_name,
            date_of_birth: row.date_of_birth,
            gender: row.gender,
            home_address: row.home_address,
            phone_number: row.phone_number,
        }
    }
}

/// Repository for the `patients` table.
#[derive(Debug, Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    /// Create a new patient repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Patient> for PatientRepository {
    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError> {
        let row = sqlx::query_as::<_, PatientRow>(
            r"
            SELECT uuid, last_name, first_name, date_of_birth, gender, home_address, phone_number
            FROM abernathyclinic_mediscreen.patients
            WHERE uuid = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Patient::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Option<Patient>, RepositoryError> {
        // No ORDER BY: duplicates resolve to whichever row Postgres returns first.
        let row = sqlx::query_as::<_, PatientRow>(
            r"
            SELECT uuid, last_name, first_name, date_of_birth, gender, home_address, phone_number
            FROM abernathyclinic_mediscreen.patients
            WHERE last_name = $1 AND first_name = $2
            LIMIT 1
            ",
        )
        .bind(last_name)
        .bind(first_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Patient::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Patient>, RepositoryError> {
        let rows = sqlx::query_as::<_, PatientRow>(
            r"
            SELECT uuid, last_name, first_name, date_of_birth, gender, home_address, phone_number
            FROM abernathyclinic_mediscreen.patients
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Patient::from).collect())
    }

    #[instrument(skip(self, patient), fields(id = ?patient.uuid))]
    async fn save(&self, patient: Patient) -> Result<Patient, RepositoryError> {
        let id = patient.id().unwrap_or_else(Patient::new_id);

        let row = sqlx::query_as::<_, PatientRow>(
            r"
            INSERT INTO abernathyclinic_mediscreen.patients
                (uuid, last_name, first_name, date_of_birth, gender, home_address, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (uuid) DO UPDATE SET
                last_name = EXCLUDED.last_name,
                first_name = EXCLUDED.first_name,
                date_of_birth = EXCLUDED.date_of_birth,
                gender = EXCLUDED.gender,
                home_address = EXCLUDED.home_address,
                phone_number = EXCLUDED.phone_number
            RETURNING uuid, last_name, first_name, date_of_birth, gender, home_address, phone_number
            ",
        )
        .bind(id)
        .bind(&patient.last_name)
        .bind(&patient.first_name)
        .bind(&patient.date_of_birth)
        .bind(&patient.gender)
        .bind(&patient.home_address)
        .bind(&patient.phone_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self, patient), fields(id = ?patient.uuid))]
    async fn delete(&self, patient: &Patient) -> Result<(), RepositoryError> {
        let id = patient.id().ok_or(RepositoryError::MissingId(Patient::KIND))?;

        sqlx::query("DELETE FROM abernathyclinic_mediscreen.patients WHERE uuid = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        ping_pool(&self.pool).await
    }
}
