//! # vocab
//!
//! REST backend for a vocabulary-learning app: accounts, languages,
//! categories, vocabulary entries and review progress.
//!
//! ## Access control
//!
//! Every owned record (a category, an entry, a progress record, an account)
//! is read or changed only after [`core::access`] has decided that the
//! caller owns it or is an administrator. Listings without an owner filter
//! are scoped to the caller, administrators included.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vocab::prelude::*;
//!
//! let mut config = AppConfig::from_yaml_file("vocab.yaml")?;
//! config.apply_env()?;
//!
//! let store = InMemoryStore::new();
//! seed_languages(&store).await?;
//!
//! ServerBuilder::new()
//!     .with_config(config)
//!     .with_store(store)
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod seed;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Access control ===
    pub use crate::core::access::{
        AccessDecision, AccessError, AccessReason, ListingScope, OwnedResource, Principal, Role,
        authorize, authorize_listing, authorize_resource, guard,
    };

    // === Core ===
    pub use crate::core::{
        auth::{AuthProvider, Claims, JwtAuthProvider, TokenService},
        entity::Entity,
        error::{ApiError, ApiResult},
        response::ApiResponse,
        service::{
            CategoryService, LanguageService, MembershipService, ProgressService, UserService,
            VocabEntryService, VocabStore,
        },
    };

    // === Entities ===
    pub use crate::entities::{
        Category, Language, User, UserVocabProgress, VocabCategory, VocabEntry,
    };

    // === Macros ===
    pub use crate::{impl_entity, impl_owned_resource};

    // === Storage, seeding, config ===
    pub use crate::config::AppConfig;
    pub use crate::seed::{SeedReport, seed_languages};
    pub use crate::storage::InMemoryStore;

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
