//! Repository interface over users and resume records.
//!
//! Writes go through an explicit [`StoreTransaction`] so callers decide where
//! a unit of work commits or rolls back. Reads run directly on the store.
//!
//! `AppState` holds an `Arc<dyn RecordStore>`; [`postgres::PgRecordStore`]
//! is the production backend.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::resume::{NewResumeRecord, ResumeRecord};
use crate::models::user::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User {0} does not exist")]
    UnknownUser(i64),

    #[error("Improvements could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Opens a unit of work. Dropping it without `commit` discards its writes.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;

    /// All records owned by `user_id`, oldest first.
    async fn list_resume_records_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ResumeRecord>, StoreError>;

    async fn find_resume_record(&self, id: i64) -> Result<Option<ResumeRecord>, StoreError>;
}

#[async_trait]
pub trait StoreTransaction: Send {
    /// First user (lowest id) with exactly this name.
    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>, StoreError>;

    async fn create_user(&mut self, name: &str) -> Result<User, StoreError>;

    /// Fails with [`StoreError::UnknownUser`] when `record.user_id` has no user.
    async fn create_resume_record(
        &mut self,
        record: &NewResumeRecord,
    ) -> Result<ResumeRecord, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
