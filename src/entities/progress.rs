//! Per-user learning progress on vocabulary entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::validation::RequestBody;

/// Progress of one user on one entry; `(user_id, vocab_entry_id)` is unique
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserVocabProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vocab_entry_id: Uuid,
    /// 0 to 100
    pub mastery_score: i32,
    pub reviewed_at: DateTime<Utc>,
    pub is_known: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(UserVocabProgress, "progress record");
crate::impl_owned_resource!(UserVocabProgress, user_id);

impl UserVocabProgress {
    pub fn new(user_id: Uuid, vocab_entry_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            vocab_entry_id,
            mastery_score: 0,
            reviewed_at: now,
            is_known: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a review, keeping fields the review leaves out
    pub fn record(&mut self, review: &RecordReview) {
        if let Some(score) = review.mastery_score {
            self.mastery_score = score;
        }
        if let Some(known) = review.is_known {
            self.is_known = known;
        }
        self.reviewed_at = Utc::now();
        self.touch();
    }
}

/// Body of `PUT /api/progress/entries/{entry_id}`
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct RecordReview {
    #[validate(range(min = 0, max = 100, message = "Mastery score must be between 0 and 100"))]
    pub mastery_score: Option<i32>,
    pub is_known: Option<bool>,
}

impl RequestBody for RecordReview {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_defaults() {
        let p = UserVocabProgress::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(p.mastery_score, 0);
        assert!(!p.is_known);
    }

    #[test]
    fn test_record_keeps_unset_fields() {
        let mut p = UserVocabProgress::new(Uuid::new_v4(), Uuid::new_v4());
        p.record(&RecordReview {
            mastery_score: Some(40),
            is_known: None,
        });
        p.record(&RecordReview {
            mastery_score: None,
            is_known: Some(true),
        });
        assert_eq!(p.mastery_score, 40);
        assert!(p.is_known);
    }

    #[test]
    fn test_score_range() {
        let review = RecordReview {
            mastery_score: Some(101),
            is_known: None,
        };
        assert!(review.validate().is_err());
    }
}
