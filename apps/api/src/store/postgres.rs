use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::models::resume::{NewResumeRecord, ResumeRecord};
use crate::models::user::User;
use crate::store::{RecordStore, StoreError, StoreTransaction};

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStoreTransaction { tx }))
    }

    async fn list_resume_records_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ResumeRecord>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRecord>(
            r#"
            SELECT id, user_id, filename, content, score, improvements, created_at
            FROM resumes
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_resume_record(&self, id: i64) -> Result<Option<ResumeRecord>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRecord>(
            r#"
            SELECT id, user_id, filename, content, score, improvements, created_at
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, name FROM users WHERE name = $1 ORDER BY id ASC LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?)
    }

    async fn create_user(&mut self, name: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await?;
        info!("Created user {} ({})", user.id, user.name);
        Ok(user)
    }

    async fn create_resume_record(
        &mut self,
        record: &NewResumeRecord,
    ) -> Result<ResumeRecord, StoreError> {
        let improvements = record.serialized_improvements()?;
        // TEXT columns reject NUL, which some PDFs emit
        let content = record.content.replace('\0', "");

        let inserted = sqlx::query_as::<_, ResumeRecord>(
            r#"
            INSERT INTO resumes (user_id, filename, content, score, improvements)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, filename, content, score, improvements, created_at
            "#,
        )
        .bind(record.user_id)
        .bind(&record.filename)
        .bind(&content)
        .bind(record.score)
        .bind(&improvements)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            let missing_user = e
                .as_database_error()
                .and_then(|d| d.code())
                .is_some_and(|code| code == FOREIGN_KEY_VIOLATION);
            if missing_user {
                StoreError::UnknownUser(record.user_id)
            } else {
                StoreError::Database(e)
            }
        })?;

        info!(
            "Inserted resume record {} for user {}",
            inserted.id, inserted.user_id
        );
        Ok(inserted)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        Ok(self.tx.commit().await?)
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(self.tx.rollback().await?)
    }
}
