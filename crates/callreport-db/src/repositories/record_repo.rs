//! In-memory call-record repository
//!
//! Holds records in insertion order behind a read-write lock. Reports read
//! far more often than records are loaded, so reads take a shared lock and
//! hand out clones.

use async_trait::async_trait;
use callreport_core::{
    models::CallDetailRecord, traits::CallRecordRepository, AppError, AppResult,
};
use indexmap::IndexSet;
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// In-memory implementation of CallRecordRepository
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: RwLock<Vec<CallDetailRecord>>,
}

impl InMemoryRecordRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with `records`
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if two records share an id.
    pub fn with_records(records: Vec<CallDetailRecord>) -> AppResult<Self> {
        let repo = Self::new();
        repo.insert_many(records)?;
        Ok(repo)
    }

    /// Append a record
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if a record with the same id is stored.
    pub fn insert(&self, record: CallDetailRecord) -> AppResult<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(AppError::AlreadyExists(format!(
                "Record with id {} already exists",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }

    /// Append several records atomically
    ///
    /// Either every record is stored or, on a duplicate id, none is.
    pub fn insert_many(&self, batch: Vec<CallDetailRecord>) -> AppResult<usize> {
        let mut records = self.records.write();
        let mut seen: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();

        for record in &batch {
            if !seen.insert(record.id.as_str()) {
                return Err(AppError::AlreadyExists(format!(
                    "Record with id {} already exists",
                    record.id
                )));
            }
        }
        drop(seen);

        let inserted = batch.len();
        records.extend(batch);
        debug!("Stored {} records ({} total)", inserted, records.len());
        Ok(inserted)
    }
}

#[async_trait]
impl CallRecordRepository for InMemoryRecordRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> AppResult<Vec<CallDetailRecord>> {
        let records = self.records.read();
        debug!("Loading all {} records", records.len());
        Ok(records.clone())
    }

    #[instrument(skip(self))]
    async fn find_first(&self, limit: usize) -> AppResult<Vec<CallDetailRecord>> {
        Ok(self.records.read().iter().take(limit).cloned().collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<CallDetailRecord>> {
        debug!("Finding record by id: {}", id);
        Ok(self.records.read().iter().find(|r| r.id == id).cloned())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.records.read().len())
    }

    async fn languages(&self) -> AppResult<Vec<String>> {
        let records = self.records.read();
        let languages: IndexSet<&str> = records.iter().map(|r| r.language.as_str()).collect();
        Ok(languages.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, language: &str) -> CallDetailRecord {
        CallDetailRecord {
            id: id.to_string(),
            language: language.to_string(),
            duration: "1m 00s".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let repo = InMemoryRecordRepository::new();
        repo.insert(record("b", "English")).unwrap();
        repo.insert(record("a", "French")).unwrap();

        let ids: Vec<String> = repo.find_all().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = InMemoryRecordRepository::new();
        repo.insert(record("1", "English")).unwrap();

        let err = repo.insert(record("1", "French")).unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_many_is_all_or_nothing() {
        let repo = InMemoryRecordRepository::with_records(vec![record("1", "English")]).unwrap();

        let err = repo
            .insert_many(vec![record("2", "French"), record("2", "Swahili")])
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(repo.count().await.unwrap(), 1);

        assert_eq!(repo.insert_many(vec![record("2", "French")]).unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_and_first() {
        let repo = InMemoryRecordRepository::with_records(vec![
            record("1", "English"),
            record("2", "Swahili"),
            record("3", "French"),
        ])
        .unwrap();

        assert_eq!(repo.find_by_id("2").await.unwrap().unwrap().language, "Swahili");
        assert!(repo.find_by_id("9").await.unwrap().is_none());
        assert_eq!(repo.find_first(2).await.unwrap().len(), 2);
        assert_eq!(repo.find_first(10).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_languages_first_seen_order() {
        let repo = InMemoryRecordRepository::with_records(vec![
            record("1", "Swahili"),
            record("2", "English"),
            record("3", "Swahili"),
            record("4", "French"),
        ])
        .unwrap();

        assert_eq!(
            repo.languages().await.unwrap(),
            vec!["Swahili", "English", "French"]
        );
    }
}
