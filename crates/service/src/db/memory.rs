//! In-process record store.

use async_trait::async_trait;
use mediscreen_core::Record;
use tokio::sync::RwLock;

use super::{RecordStore, RepositoryError};

/// Keeps records in insertion order behind an async lock.
///
/// Name lookups return the earliest inserted match.
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R> MemoryStore<R> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn find_by_id(&self, id: R::Id) -> Result<Option<R>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == Some(id)).cloned())
    }

    async fn find_by_name(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Option<R>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.matches_name(last_name, first_name))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<R>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, mut record: R) -> Result<R, RepositoryError> {
        let mut records = self.records.write().await;

        if let Some(id) = record.id()
            && let Some(existing) = records.iter_mut().find(|r| r.id() == Some(id))
        {
            *existing = record.clone();
            return Ok(record);
        }

        if record.id().is_none() {
            record.assign_id(R::new_id());
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, record: &R) -> Result<(), RepositoryError> {
        let id = record.id().ok_or(RepositoryError::MissingId(R::KIND))?;
        self.records.write().await.retain(|r| r.id() != Some(id));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mediscreen_core::{Patient, PatientId, User};

    use super::*;

    fn patient(last: &str, first: &str) -> Patient {
        Patient {
            last_name: last.to_string(),
            first_name: first.to_string(),
            date_of_birth: "01/01/1990".to_string(),
            gender: "F".to_string(),
            ..Patient::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_fresh_identifier() {
        let store = MemoryStore::<Patient>::new();

        let first = store.save(patient("Doe", "Jane")).await.unwrap();
        let second = store.save(patient("Roe", "Rick")).await.unwrap();

        assert!(first.uuid.is_some());
        assert!(second.uuid.is_some());
        assert_ne!(first.uuid, second.uuid);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_save_with_identifier_overwrites() {
        let store = MemoryStore::<Patient>::new();
        let mut saved = store.save(patient("Doe", "Jane")).await.unwrap();

        saved.gender = "X".to_string();
        store.save(saved.clone()).await.unwrap();

        assert_eq!(store.len().await, 1);
        let found = store.find_by_id(saved.uuid.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.gender, "X");
    }

    #[tokio::test]
    async fn test_find_by_name_returns_first_inserted() {
        let store = MemoryStore::<Patient>::new();
        let mut older = patient("Doe", "Jane");
        older.phone_number = Some("555-0100".to_string());
        let older = store.save(older).await.unwrap();
        store.save(patient("Doe", "Jane")).await.unwrap();

        let found = store.find_by_name("Doe", "Jane").await.unwrap().unwrap();
        assert_eq!(found.uuid, older.uuid);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = MemoryStore::<Patient>::new();
        store.save(patient("Doe", "Jane")).await.unwrap();

        assert!(store.find_by_id(PatientId::generate()).await.unwrap().is_none());
        assert!(store.find_by_name("Doe", "John").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryStore::<Patient>::new();
        let saved = store.save(patient("Doe", "Jane")).await.unwrap();

        store.delete(&saved).await.unwrap();

        assert!(store.is_empty().await);
        assert!(store.find_by_id(saved.uuid.unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unsaved_record_fails() {
        let store = MemoryStore::<User>::new();
        let result = store.delete(&User::default()).await;
        assert!(matches!(result, Err(RepositoryError::MissingId("user"))));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryStore::<Patient>::new();
        store.save(patient("Doe", "Jane")).await.unwrap();
        store.save(patient("Roe", "Rick")).await.unwrap();

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.last_name)
            .collect();
        assert_eq!(names, ["Doe", "Roe"]);
    }
}
