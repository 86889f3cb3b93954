//! Service traits for persistence
//!
//! One trait per record type. Implementations enforce uniqueness and
//! referential constraints atomically and report violations as
//! [`ApiError`](crate::core::error::ApiError) conflicts or invalid references.
//! Authorization is never checked here; callers run the access controller
//! before mutating.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::ApiResult;
use crate::entities::{
    Category, Language, RecordReview, User, UserVocabProgress, VocabCategory, VocabEntry,
};

/// Service trait for user accounts
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account; email must be unused
    async fn create_user(&self, user: User) -> ApiResult<User>;

    /// Get an account by ID
    async fn get_user(&self, id: &Uuid) -> ApiResult<Option<User>>;

    /// Find an account by its (lowercased) email
    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    /// Replace an account; email uniqueness excludes the account itself
    async fn update_user(&self, user: User) -> ApiResult<User>;

    /// Delete an account and cascade to owned records
    ///
    /// Returns false if the account did not exist.
    async fn delete_user(&self, id: &Uuid) -> ApiResult<bool>;
}

/// Service trait for languages
#[async_trait]
pub trait LanguageService: Send + Sync {
    /// List all languages, ordered by name
    async fn list_languages(&self) -> ApiResult<Vec<Language>>;

    /// Get a language by ID
    async fn get_language(&self, id: &Uuid) -> ApiResult<Option<Language>>;

    /// Insert unless a language with the same code exists
    ///
    /// Returns whether the row was inserted.
    async fn insert_language_if_absent(&self, language: Language) -> ApiResult<bool>;
}

/// Service trait for categories
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Create a category; `(user_id, name)` must be unused
    async fn create_category(&self, category: Category) -> ApiResult<Category>;

    /// Get a category by ID
    async fn get_category(&self, id: &Uuid) -> ApiResult<Option<Category>>;

    /// List the categories of one owner
    async fn list_categories(&self, owner_id: &Uuid) -> ApiResult<Vec<Category>>;

    /// Replace a category; name uniqueness excludes the category itself
    async fn update_category(&self, category: Category) -> ApiResult<Category>;

    /// Delete a category and its memberships
    async fn delete_category(&self, id: &Uuid) -> ApiResult<bool>;
}

/// Service trait for vocabulary entries
#[async_trait]
pub trait VocabEntryService: Send + Sync {
    /// Create an entry; the language must exist
    async fn create_entry(&self, entry: VocabEntry) -> ApiResult<VocabEntry>;

    /// Get an entry by ID
    async fn get_entry(&self, id: &Uuid) -> ApiResult<Option<VocabEntry>>;

    /// List the entries of one owner, optionally in one language
    async fn list_entries(
        &self,
        owner_id: &Uuid,
        language_id: Option<&Uuid>,
    ) -> ApiResult<Vec<VocabEntry>>;

    /// Replace an entry; the language must exist
    async fn update_entry(&self, entry: VocabEntry) -> ApiResult<VocabEntry>;

    /// Delete an entry with its memberships and progress records
    async fn delete_entry(&self, id: &Uuid) -> ApiResult<bool>;
}

/// Service trait for category memberships
#[async_trait]
pub trait MembershipService: Send + Sync {
    /// Add an entry to a category; adding twice is a conflict
    async fn add_to_category(&self, category_id: &Uuid, entry_id: &Uuid)
    -> ApiResult<VocabCategory>;

    /// Remove an entry from a category
    async fn remove_from_category(&self, category_id: &Uuid, entry_id: &Uuid) -> ApiResult<bool>;

    /// List the entries of a category
    async fn list_category_entries(&self, category_id: &Uuid) -> ApiResult<Vec<VocabEntry>>;
}

/// Service trait for learning progress
#[async_trait]
pub trait ProgressService: Send + Sync {
    /// Record a review, creating the `(user, entry)` record on first use
    ///
    /// Returns the record and whether it was created.
    async fn record_review(
        &self,
        user_id: &Uuid,
        entry_id: &Uuid,
        review: &RecordReview,
    ) -> ApiResult<(UserVocabProgress, bool)>;

    /// Get a progress record by ID
    async fn get_progress(&self, id: &Uuid) -> ApiResult<Option<UserVocabProgress>>;

    /// List the progress records of one user
    async fn list_progress(&self, user_id: &Uuid) -> ApiResult<Vec<UserVocabProgress>>;

    /// Delete a progress record
    async fn delete_progress(&self, id: &Uuid) -> ApiResult<bool>;
}

/// Everything the HTTP layer needs from persistence
pub trait VocabStore:
    UserService
    + LanguageService
    + CategoryService
    + VocabEntryService
    + MembershipService
    + ProgressService
{
}

impl<T> VocabStore for T where
    T: UserService
        + LanguageService
        + CategoryService
        + VocabEntryService
        + MembershipService
        + ProgressService
{
}
