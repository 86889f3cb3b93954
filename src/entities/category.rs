//! User-owned categories grouping vocabulary entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::validation::validators::at_least_one;
use crate::core::validation::{FieldFilter, RequestBody, filters};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Unique per owner
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Category, "category");
crate::impl_owned_resource!(Category, user_id);

impl Category {
    pub fn new(user_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
}

impl RequestBody for CreateCategory {
    const FILTERS: &'static [(&'static str, FieldFilter)] = &[("name", filters::trim)];
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_category_update"))]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "Category name cannot be empty"))]
    pub name: Option<String>,
}

impl RequestBody for UpdateCategory {
    const FILTERS: &'static [(&'static str, FieldFilter)] = &[("name", filters::trim)];
}

fn validate_category_update(update: &UpdateCategory) -> Result<(), ValidationError> {
    at_least_one(&[update.name.is_some()], "name")
}
