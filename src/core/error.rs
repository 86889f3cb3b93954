//! Typed error handling for the vocabulary API
//!
//! Handlers and stores return [`ApiError`] so that every failure maps to one
//! HTTP status, one machine-readable code and one envelope shape.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing records, uniqueness conflicts, dangling references
//! - [`AuthError`]: authentication and authorization failures
//! - [`ValidationError`]: malformed or invalid request input
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! let category = store
//!     .get_category(&id)
//!     .await?
//!     .ok_or_else(|| ApiError::not_found("category", id))?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::core::access::AccessError;
use crate::core::response::ApiResponse;

/// The main error type of the API
#[derive(Debug)]
pub enum ApiError {
    /// Record-level errors (lookup, uniqueness, references)
    Entity(EntityError),

    /// Authentication / authorization errors
    Auth(AuthError),

    /// Request validation errors
    Validation(ValidationError),

    /// Configuration errors
    Config(ConfigError),

    /// Unexpected failures (hashing, token encoding, ...)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Auth(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Config(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Entity(e) => Some(e),
            ApiError::Auth(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Config(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

impl ApiError {
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        ApiError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        })
    }

    pub fn conflict(entity_type: &str, message: impl Into<String>) -> Self {
        ApiError::Entity(EntityError::AlreadyExists {
            entity_type: entity_type.to_string(),
            message: message.into(),
        })
    }

    pub fn invalid_reference(field: &str, id: Uuid) -> Self {
        ApiError::Entity(EntityError::InvalidReference {
            field: field.to_string(),
            id,
        })
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Auth(AuthError::Unauthenticated {
            message: message.into(),
        })
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Auth(AuthError::Forbidden {
            message: message.into(),
        })
    }

    pub fn internal(message: impl fmt::Display) -> Self {
        ApiError::Internal(message.to_string())
    }

    /// Map an access-control signal with the context of the resource involved
    pub fn from_access(err: AccessError, entity_type: &str, id: Uuid) -> Self {
        match err {
            AccessError::Unauthenticated => Self::unauthenticated("Authentication required."),
            AccessError::NotFound => Self::not_found(entity_type, id),
            AccessError::Forbidden => Self::forbidden(format!(
                "You do not have permission to access this {}.",
                entity_type
            )),
            AccessError::Conflict => Self::conflict(
                entity_type,
                format!("You already have another {} with this name.", entity_type),
            ),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Auth(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Auth(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to clients
    ///
    /// Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(_) => "Validation error".to_string(),
            ApiError::Config(_) | ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    fn field_errors(&self) -> Option<Vec<FieldValidationError>> {
        match self {
            ApiError::Validation(ValidationError::FieldErrors(errors)) => Some(errors.clone()),
            ApiError::Validation(e) => Some(vec![FieldValidationError {
                field: "body".to_string(),
                message: e.to_string(),
            }]),
            _ => None,
        }
    }

    /// Convert to the response envelope
    pub fn to_response(&self) -> ApiResponse<()> {
        ApiResponse::failure(self.status_code(), self.public_message())
            .with_code(self.error_code())
            .with_errors(self.field_errors())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to stored records
#[derive(Debug)]
pub enum EntityError {
    /// Record was not found
    NotFound { entity_type: String, id: Uuid },

    /// A uniqueness constraint rejected the write
    AlreadyExists {
        entity_type: String,
        message: String,
    },

    /// A foreign key points at a record that does not exist
    InvalidReference { field: String, id: Uuid },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, .. } => {
                write!(f, "{} not found.", capitalize(entity_type))
            }
            EntityError::AlreadyExists { message, .. } => write!(f, "{}", message),
            EntityError::InvalidReference { field, .. } => {
                write!(f, "Invalid {} provided.", field)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
            EntityError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::InvalidReference { .. } => "INVALID_REFERENCE",
        }
    }
}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        ApiError::Entity(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to authentication and authorization
#[derive(Debug)]
pub enum AuthError {
    /// No usable credentials were presented
    Unauthenticated { message: String },

    /// Email or password did not match
    InvalidCredentials,

    /// The principal may not perform the operation
    Forbidden { message: String },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Unauthenticated { message } => write!(f, "{}", message),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials."),
            AuthError::Forbidden { message } => write!(f, "Forbidden: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated { .. } => "UNAUTHORIZED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request input
#[derive(Debug)]
pub enum ValidationError {
    /// One or more fields failed validation
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not valid JSON or does not match the expected shape
    InvalidJson { message: String },

    /// A path or query parameter is malformed
    InvalidParameter { name: String, message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            ValidationError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter '{}': {}", name, message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue { field: String, message: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
            ConfigError::IoError { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => Self::unauthenticated("Authentication required."),
            AccessError::NotFound => ApiError::Entity(EntityError::NotFound {
                entity_type: "resource".to_string(),
                id: Uuid::nil(),
            }),
            AccessError::Forbidden => Self::forbidden(
                "You do not have permission to access resources of other users.",
            ),
            AccessError::Conflict => Self::conflict("resource", "Name already in use."),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = if field == "__all__" {
                    "body".to_string()
                } else {
                    field.to_string()
                };
                errs.iter()
                    .map(|e| FieldValidationError {
                        field: field.clone(),
                        message: e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::Validation(ValidationError::FieldErrors(fields))
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!(error = %err, "token rejected");
        Self::unauthenticated("Invalid or expired token.")
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ApiError::Internal(format!("password hashing failed: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
