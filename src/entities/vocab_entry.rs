//! Vocabulary entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::validation::validators::{at_least_one, nullable};
use crate::core::validation::{FieldFilter, RequestBody, filters};

/// A word with its meaning in a given language
///
/// `created_by_user_id` becomes `None` when the author's account is
/// deleted; such entries are manageable only by admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: Uuid,
    pub original_word: String,
    pub meaning: String,
    pub description: Option<String>,
    pub example_sentence: Option<String>,
    pub language_id: Uuid,
    pub created_by_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(VocabEntry, "vocabulary entry");
crate::impl_owned_resource!(VocabEntry, optional created_by_user_id);

impl VocabEntry {
    pub fn new(author: Uuid, input: CreateVocabEntry) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            original_word: input.original_word,
            meaning: input.meaning,
            description: input.description,
            example_sentence: input.example_sentence,
            language_id: input.language_id,
            created_by_user_id: Some(author),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update into this entry
    pub fn apply(&mut self, update: UpdateVocabEntry) {
        if let Some(word) = update.original_word {
            self.original_word = word;
        }
        if let Some(meaning) = update.meaning {
            self.meaning = meaning;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(example) = update.example_sentence {
            self.example_sentence = example;
        }
        if let Some(language_id) = update.language_id {
            self.language_id = language_id;
        }
        self.touch();
    }
}

const ENTRY_FILTERS: &[(&str, FieldFilter)] = &[
    ("original_word", filters::trim),
    ("meaning", filters::trim),
    ("description", filters::trim),
    ("example_sentence", filters::trim),
];

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVocabEntry {
    #[validate(length(min = 1, message = "Original word is required"))]
    pub original_word: String,
    #[validate(length(min = 1, message = "Meaning is required"))]
    pub meaning: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub example_sentence: Option<String>,
    pub language_id: Uuid,
}

impl RequestBody for CreateVocabEntry {
    const FILTERS: &'static [(&'static str, FieldFilter)] = ENTRY_FILTERS;
}

/// Partial update; `description` and `example_sentence` accept `null` to clear
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_entry_update"))]
pub struct UpdateVocabEntry {
    #[validate(length(min = 1, message = "Original word cannot be empty"))]
    pub original_word: Option<String>,
    #[validate(length(min = 1, message = "Meaning cannot be empty"))]
    pub meaning: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub example_sentence: Option<Option<String>>,
    pub language_id: Option<Uuid>,
}

impl RequestBody for UpdateVocabEntry {
    const FILTERS: &'static [(&'static str, FieldFilter)] = ENTRY_FILTERS;
}

fn validate_entry_update(update: &UpdateVocabEntry) -> Result<(), ValidationError> {
    at_least_one(
        &[
            update.original_word.is_some(),
            update.meaning.is_some(),
            update.description.is_some(),
            update.example_sentence.is_some(),
            update.language_id.is_some(),
        ],
        "original_word, meaning, description, example_sentence, language_id",
    )
}
