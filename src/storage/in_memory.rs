//! In-memory implementation of the store traits
//!
//! All tables live behind a single `tokio::sync::RwLock`, so every
//! constraint check and cascade runs atomically with the write it guards.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::access::ensure_unique_within_owner;
use crate::core::error::{ApiError, ApiResult};
use crate::core::service::{
    CategoryService, LanguageService, MembershipService, ProgressService, UserService,
    VocabEntryService,
};
use crate::entities::{
    Category, Language, RecordReview, User, UserVocabProgress, VocabCategory, VocabEntry,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    languages: HashMap<Uuid, Language>,
    categories: HashMap<Uuid, Category>,
    entries: HashMap<Uuid, VocabEntry>,
    memberships: HashMap<(Uuid, Uuid), VocabCategory>,
    progress: HashMap<Uuid, UserVocabProgress>,
}

impl Tables {
    fn check_email_free(&self, email: &str, current: Option<Uuid>) -> ApiResult<()> {
        let taken = self
            .users
            .values()
            .any(|u| u.email == email && Some(u.id) != current);
        if taken {
            let message = match current {
                Some(_) => "Email already taken by another user.",
                None => "Email already registered.",
            };
            return Err(ApiError::conflict("user", message));
        }
        Ok(())
    }

    fn check_user(&self, id: Option<Uuid>) -> ApiResult<()> {
        match id {
            Some(id) if !self.users.contains_key(&id) => {
                Err(ApiError::invalid_reference("user_id", id))
            }
            _ => Ok(()),
        }
    }

    fn check_language(&self, field: &str, id: Option<Uuid>) -> ApiResult<()> {
        match id {
            Some(id) if !self.languages.contains_key(&id) => {
                Err(ApiError::invalid_reference(field, id))
            }
            _ => Ok(()),
        }
    }

    fn check_category_name(&self, category: &Category, current: Option<Uuid>) -> ApiResult<()> {
        let siblings = self
            .categories
            .values()
            .filter(|c| c.user_id == category.user_id)
            .map(|c| (c.id, c.name.as_str()));

        ensure_unique_within_owner(siblings, &category.name, current).map_err(|_| {
            let message = if current.is_some() {
                "You already have another category with this name."
            } else {
                "You already have a category with this name."
            };
            ApiError::conflict("category", message)
        })
    }

    fn check_entry_word(&self, entry: &VocabEntry, current: Option<Uuid>) -> ApiResult<()> {
        let siblings = self
            .entries
            .values()
            .filter(|e| {
                e.created_by_user_id == entry.created_by_user_id
                    && e.language_id == entry.language_id
            })
            .map(|e| (e.id, e.original_word.as_str()));

        ensure_unique_within_owner(siblings, &entry.original_word, current).map_err(|_| {
            ApiError::conflict(
                "vocabulary entry",
                "A vocabulary entry with this word and language already exists.",
            )
        })
    }
}

/// In-memory store implementation
///
/// Useful for tests and single-process deployments.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserService for InMemoryStore {
    async fn create_user(&self, user: User) -> ApiResult<User> {
        let mut tables = self.tables.write().await;
        tables.check_email_free(&user.email, None)?;
        tables.check_language("current_language_id", user.current_language_id)?;

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &Uuid) -> ApiResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: User) -> ApiResult<User> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(ApiError::not_found("user", user.id));
        }
        tables.check_email_free(&user.email, Some(user.id))?;
        tables.check_language("current_language_id", user.current_language_id)?;

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: &Uuid) -> ApiResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(id).is_none() {
            return Ok(false);
        }

        let owned: Vec<Uuid> = tables
            .categories
            .values()
            .filter(|c| c.user_id == *id)
            .map(|c| c.id)
            .collect();
        for category_id in &owned {
            tables.categories.remove(category_id);
        }
        tables
            .memberships
            .retain(|(category_id, _), _| !owned.contains(category_id));
        tables.progress.retain(|_, p| p.user_id != *id);

        for entry in tables.entries.values_mut() {
            if entry.created_by_user_id == Some(*id) {
                entry.created_by_user_id = None;
            }
        }

        tracing::debug!(user_id = %id, categories = owned.len(), "user deleted");
        Ok(true)
    }
}

#[async_trait]
impl LanguageService for InMemoryStore {
    async fn list_languages(&self) -> ApiResult<Vec<Language>> {
        let tables = self.tables.read().await;
        let mut languages: Vec<Language> = tables.languages.values().cloned().collect();
        languages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(languages)
    }

    async fn get_language(&self, id: &Uuid) -> ApiResult<Option<Language>> {
        Ok(self.tables.read().await.languages.get(id).cloned())
    }

    async fn insert_language_if_absent(&self, language: Language) -> ApiResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.languages.values().any(|l| l.code == language.code) {
            return Ok(false);
        }
        tables.languages.insert(language.id, language);
        Ok(true)
    }
}

#[async_trait]
impl CategoryService for InMemoryStore {
    async fn create_category(&self, category: Category) -> ApiResult<Category> {
        let mut tables = self.tables.write().await;
        tables.check_user(Some(category.user_id))?;
        tables.check_category_name(&category, None)?;

        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: &Uuid) -> ApiResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(id).cloned())
    }

    async fn list_categories(&self, owner_id: &Uuid) -> ApiResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables
            .categories
            .values()
            .filter(|c| c.user_id == *owner_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    async fn update_category(&self, category: Category) -> ApiResult<Category> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&category.id) {
            return Err(ApiError::not_found("category", category.id));
        }
        tables.check_category_name(&category, Some(category.id))?;

        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: &Uuid) -> ApiResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(id).is_none() {
            return Ok(false);
        }
        tables.memberships.retain(|(category_id, _), _| category_id != id);
        Ok(true)
    }
}

#[async_trait]
impl VocabEntryService for InMemoryStore {
    async fn create_entry(&self, entry: VocabEntry) -> ApiResult<VocabEntry> {
        let mut tables = self.tables.write().await;
        tables.check_user(entry.created_by_user_id)?;
        tables.check_language("language_id", Some(entry.language_id))?;
        tables.check_entry_word(&entry, None)?;

        tables.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get_entry(&self, id: &Uuid) -> ApiResult<Option<VocabEntry>> {
        Ok(self.tables.read().await.entries.get(id).cloned())
    }

    async fn list_entries(
        &self,
        owner_id: &Uuid,
        language_id: Option<&Uuid>,
    ) -> ApiResult<Vec<VocabEntry>> {
        let tables = self.tables.read().await;
        let mut entries: Vec<VocabEntry> = tables
            .entries
            .values()
            .filter(|e| e.created_by_user_id == Some(*owner_id))
            .filter(|e| language_id.is_none_or(|l| e.language_id == *l))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(entries)
    }

    async fn update_entry(&self, entry: VocabEntry) -> ApiResult<VocabEntry> {
        let mut tables = self.tables.write().await;
        if !tables.entries.contains_key(&entry.id) {
            return Err(ApiError::not_found("vocabulary entry", entry.id));
        }
        tables.check_language("language_id", Some(entry.language_id))?;
        tables.check_entry_word(&entry, Some(entry.id))?;

        tables.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn delete_entry(&self, id: &Uuid) -> ApiResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.entries.remove(id).is_none() {
            return Ok(false);
        }
        tables.memberships.retain(|(_, entry_id), _| entry_id != id);
        tables.progress.retain(|_, p| p.vocab_entry_id != *id);
        Ok(true)
    }
}

#[async_trait]
impl MembershipService for InMemoryStore {
    async fn add_to_category(
        &self,
        category_id: &Uuid,
        entry_id: &Uuid,
    ) -> ApiResult<VocabCategory> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(category_id) {
            return Err(ApiError::not_found("category", *category_id));
        }
        if !tables.entries.contains_key(entry_id) {
            return Err(ApiError::not_found("vocabulary entry", *entry_id));
        }

        let key = (*category_id, *entry_id);
        if tables.memberships.contains_key(&key) {
            return Err(ApiError::conflict(
                "category",
                "This entry is already in the category.",
            ));
        }

        let membership = VocabCategory::new(*category_id, *entry_id);
        tables.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    async fn remove_from_category(&self, category_id: &Uuid, entry_id: &Uuid) -> ApiResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .memberships
            .remove(&(*category_id, *entry_id))
            .is_some())
    }

    async fn list_category_entries(&self, category_id: &Uuid) -> ApiResult<Vec<VocabEntry>> {
        let tables = self.tables.read().await;
        let mut members: Vec<&VocabCategory> = tables
            .memberships
            .values()
            .filter(|m| m.category_id == *category_id)
            .collect();
        members.sort_by_key(|m| m.created_at);

        Ok(members
            .into_iter()
            .filter_map(|m| tables.entries.get(&m.vocab_entry_id).cloned())
            .collect())
    }
}

#[async_trait]
impl ProgressService for InMemoryStore {
    async fn record_review(
        &self,
        user_id: &Uuid,
        entry_id: &Uuid,
        review: &RecordReview,
    ) -> ApiResult<(UserVocabProgress, bool)> {
        let mut tables = self.tables.write().await;
        tables.check_user(Some(*user_id))?;
        if !tables.entries.contains_key(entry_id) {
            return Err(ApiError::not_found("vocabulary entry", *entry_id));
        }

        if let Some(existing) = tables
            .progress
            .values_mut()
            .find(|p| p.user_id == *user_id && p.vocab_entry_id == *entry_id)
        {
            existing.record(review);
            return Ok((existing.clone(), false));
        }

        let mut progress = UserVocabProgress::new(*user_id, *entry_id);
        progress.record(review);
        tables.progress.insert(progress.id, progress.clone());
        Ok((progress, true))
    }

    async fn get_progress(&self, id: &Uuid) -> ApiResult<Option<UserVocabProgress>> {
        Ok(self.tables.read().await.progress.get(id).cloned())
    }

    async fn list_progress(&self, user_id: &Uuid) -> ApiResult<Vec<UserVocabProgress>> {
        let tables = self.tables.read().await;
        let mut records: Vec<UserVocabProgress> = tables
            .progress
            .values()
            .filter(|p| p.user_id == *user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.reviewed_at.cmp(&a.reviewed_at));
        Ok(records)
    }

    async fn delete_progress(&self, id: &Uuid) -> ApiResult<bool> {
        Ok(self.tables.write().await.progress.remove(id).is_some())
    }
}
