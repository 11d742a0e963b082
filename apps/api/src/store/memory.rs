//! In-memory `RecordStore` used by handler tests.
//!
//! A transaction works on a copy of the tables and publishes it on commit.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::resume::{NewResumeRecord, ResumeRecord};
use crate::models::user::User;
use crate::store::{RecordStore, StoreError, StoreTransaction};

#[derive(Debug, Default, Clone)]
struct Tables {
    users: Vec<User>,
    resumes: Vec<ResumeRecord>,
}

#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    tables: Arc<Mutex<Tables>>,
    fail_resume_inserts: bool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `create_resume_record` fails, as a broken database would.
    pub fn failing_resume_inserts() -> Self {
        Self {
            fail_resume_inserts: true,
            ..Self::default()
        }
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn resume_count(&self) -> usize {
        self.tables.lock().unwrap().resumes.len()
    }
}

pub struct MemoryTransaction {
    shared: Arc<Mutex<Tables>>,
    working: Tables,
    fail_resume_inserts: bool,
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let working = self.tables.lock().unwrap().clone();
        Ok(Box::new(MemoryTransaction {
            shared: Arc::clone(&self.tables),
            working,
            fail_resume_inserts: self.fail_resume_inserts,
        }))
    }

    async fn list_resume_records_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ResumeRecord>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .resumes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_resume_record(&self, id: i64) -> Result<Option<ResumeRecord>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.resumes.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>, StoreError> {
        Ok(self.working.users.iter().find(|u| u.name == name).cloned())
    }

    async fn create_user(&mut self, name: &str) -> Result<User, StoreError> {
        let user = User {
            id: self.working.users.len() as i64 + 1,
            name: name.to_string(),
        };
        self.working.users.push(user.clone());
        Ok(user)
    }

    async fn create_resume_record(
        &mut self,
        record: &NewResumeRecord,
    ) -> Result<ResumeRecord, StoreError> {
        if self.fail_resume_inserts {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        if !self.working.users.iter().any(|u| u.id == record.user_id) {
            return Err(StoreError::UnknownUser(record.user_id));
        }
        let inserted = ResumeRecord {
            id: self.working.resumes.len() as i64 + 1,
            user_id: record.user_id,
            filename: record.filename.clone(),
            content: record.content.clone(),
            score: record.score,
            improvements: record.serialized_improvements()?,
            created_at: Utc::now(),
        };
        self.working.resumes.push(inserted.clone());
        Ok(inserted)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTransaction {
            shared, working, ..
        } = *self;
        *shared.lock().unwrap() = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(user_id: i64) -> NewResumeRecord {
        NewResumeRecord {
            user_id,
            filename: "cv.pdf".to_string(),
            content: "text".to_string(),
            score: 10.0,
            improvements: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[tokio::test]
    async fn test_uncommitted_writes_are_discarded() {
        let store = MemoryRecordStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.create_user("ada").await.unwrap();
        tx.rollback().await.unwrap();
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let store = MemoryRecordStore::new();
        let mut tx = store.begin().await.unwrap();
        let err = tx.create_resume_record(&new_record(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(99)));
    }

    #[tokio::test]
    async fn test_records_listed_per_user_in_insert_order() {
        let store = MemoryRecordStore::new();
        let mut tx = store.begin().await.unwrap();
        let ada = tx.create_user("ada").await.unwrap();
        let bob = tx.create_user("bob").await.unwrap();
        tx.create_resume_record(&new_record(ada.id)).await.unwrap();
        tx.create_resume_record(&new_record(bob.id)).await.unwrap();
        tx.create_resume_record(&new_record(ada.id)).await.unwrap();
        tx.commit().await.unwrap();

        let records = store.list_resume_records_by_user(ada.id).await.unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(records[0].improvement_list().unwrap(), vec!["a", "b"]);
    }
}
