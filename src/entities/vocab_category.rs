//! Category membership of vocabulary entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Links one entry to one category; the pair is the key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabCategory {
    pub vocab_entry_id: Uuid,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl VocabCategory {
    pub fn new(category_id: Uuid, vocab_entry_id: Uuid) -> Self {
        Self {
            vocab_entry_id,
            category_id,
            created_at: Utc::now(),
        }
    }
}
