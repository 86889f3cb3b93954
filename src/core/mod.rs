//! Core module: access control, authentication, errors and the traits
//! the rest of the crate is built on

pub mod access;
pub mod auth;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod password;
pub mod response;
pub mod service;
pub mod validation;

pub use access::{AccessDecision, AccessError, AccessReason, OwnedResource, Principal, Role};
pub use auth::{AuthProvider, JwtAuthProvider, TokenService};
pub use entity::Entity;
pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
pub use service::VocabStore;
