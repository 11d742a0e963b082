use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person known only by name. Created on first login, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}
