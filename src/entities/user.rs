//! User accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::access::Role;
use crate::core::validation::validators::{at_least_one, nullable};
use crate::core::validation::{FieldFilter, RequestBody, filters};

/// A registered account
///
/// An account owns itself for access-control purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    /// Argon2 PHC string, never sent to clients
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    #[serde(default)]
    pub role: Role,
    pub current_language_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(User, "user");
crate::impl_owned_resource!(User, id);

impl User {
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        current_language_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            current_language_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[serde(default)]
    pub current_language_id: Option<Uuid>,
}

impl RequestBody for RegisterUser {
    const FILTERS: &'static [(&'static str, FieldFilter)] = &[
        ("name", filters::trim),
        ("email", filters::trim),
        ("email", filters::lowercase),
    ];
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl RequestBody for LoginUser {
    const FILTERS: &'static [(&'static str, FieldFilter)] =
        &[("email", filters::trim), ("email", filters::lowercase)];
}

/// Body of `PUT /api/auth/me`
///
/// `current_language_id: null` clears the preference.
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_user_update"))]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub current_language_id: Option<Option<Uuid>>,
}

impl RequestBody for UpdateUser {
    const FILTERS: &'static [(&'static str, FieldFilter)] = &[
        ("name", filters::trim),
        ("email", filters::trim),
        ("email", filters::lowercase),
    ];
}

fn validate_user_update(update: &UpdateUser) -> Result<(), ValidationError> {
    at_least_one(
        &[
            update.name.is_some(),
            update.email.is_some(),
            update.password.is_some(),
            update.current_language_id.is_some(),
        ],
        "name, email, password, current_language_id",
    )
}

/// Response body of register and login
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}
