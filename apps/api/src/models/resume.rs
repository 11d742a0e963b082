use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One analysed upload. `improvements` holds a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumeRecord {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub content: String,
    pub score: f64,
    pub improvements: String,
    pub created_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn improvement_list(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.improvements)
    }
}

/// Insert payload for a resume record.
#[derive(Debug, Clone)]
pub struct NewResumeRecord {
    pub user_id: i64,
    pub filename: String,
    pub content: String,
    pub score: f64,
    pub improvements: Vec<String>,
}

impl NewResumeRecord {
    pub fn serialized_improvements(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.improvements)
    }
}

/// Entry of `GET /history/:user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub filename: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub improvements: Vec<String>,
}

impl TryFrom<ResumeRecord> for HistoryEntry {
    type Error = serde_json::Error;

    fn try_from(record: ResumeRecord) -> Result<Self, Self::Error> {
        let improvements = record.improvement_list()?;
        Ok(HistoryEntry {
            id: record.id,
            filename: record.filename,
            score: record.score,
            created_at: record.created_at,
            improvements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(improvements: &str) -> ResumeRecord {
        ResumeRecord {
            id: 7,
            user_id: 1,
            filename: "cv.pdf".to_string(),
            content: "text".to_string(),
            score: 42.0,
            improvements: improvements.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_improvements_round_trip_through_history_entry() {
        let new = NewResumeRecord {
            user_id: 1,
            filename: "cv.pdf".to_string(),
            content: "text".to_string(),
            score: 42.0,
            improvements: vec!["Resume is too short. Consider adding more details.".to_string()],
        };
        let stored = record(&new.serialized_improvements().unwrap());
        let entry = HistoryEntry::try_from(stored).unwrap();
        assert_eq!(entry.improvements, new.improvements);
        assert_eq!(entry.id, 7);
    }

    #[test]
    fn test_empty_list_serializes_as_json_array() {
        let new = NewResumeRecord {
            user_id: 1,
            filename: "cv.pdf".to_string(),
            content: String::new(),
            score: 0.0,
            improvements: vec![],
        };
        assert_eq!(new.serialized_improvements().unwrap(), "[]");
    }

    #[test]
    fn test_corrupt_improvements_fail_conversion() {
        assert!(HistoryEntry::try_from(record("not json")).is_err());
    }
}
