//! Vocabulary entry handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use crate::core::access::Principal;
use crate::core::error::ApiResult;
use crate::core::extractors::{ApiPath, ApiQuery, Authenticated, EntryQuery};
use crate::core::response::ApiResponse;
use crate::core::validation::ValidJson;
use crate::entities::{CreateVocabEntry, UpdateVocabEntry, VocabEntry};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;

use super::{authorize_owned, deleted, listing_scope};

/// Routes under `/vocab-entries`
pub struct VocabEntryDescriptor {
    state: AppState,
}

impl VocabEntryDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for VocabEntryDescriptor {
    fn entity_type(&self) -> &str {
        "vocab_entry"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/vocab-entries", post(create_entry).get(list_entries))
            .route(
                "/vocab-entries/{id}",
                get(get_entry).put(update_entry).delete(delete_entry),
            )
            .with_state(self.state.clone())
    }
}

async fn owned_entry(state: &AppState, principal: &Principal, id: Uuid) -> ApiResult<VocabEntry> {
    let found = state.store.get_entry(&id).await?;
    authorize_owned(principal, found, id)
}

pub async fn create_entry(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ValidJson(body): ValidJson<CreateVocabEntry>,
) -> ApiResult<ApiResponse<VocabEntry>> {
    let entry = state
        .store
        .create_entry(VocabEntry::new(principal.id, body))
        .await?;

    Ok(ApiResponse::created(
        "Vocabulary entry created successfully!",
        entry,
    ))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiQuery(query): ApiQuery<EntryQuery>,
) -> ApiResult<ApiResponse<Vec<VocabEntry>>> {
    let scope = listing_scope(&principal, query.user_id, "vocabulary entries")?;
    let entries = state
        .store
        .list_entries(&scope.owner_id, query.language_id.as_ref())
        .await?;

    Ok(ApiResponse::ok(
        "Fetched vocabulary entries successfully!",
        entries,
    ))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<VocabEntry>> {
    let entry = owned_entry(&state, &principal, id).await?;
    Ok(ApiResponse::ok("Fetched vocabulary entry successfully!", entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(body): ValidJson<UpdateVocabEntry>,
) -> ApiResult<ApiResponse<VocabEntry>> {
    let mut entry = owned_entry(&state, &principal, id).await?;
    entry.apply(body);

    let entry = state.store.update_entry(entry).await?;
    Ok(ApiResponse::ok(
        "Vocabulary entry updated successfully!",
        entry,
    ))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    owned_entry(&state, &principal, id).await?;
    let removed = state.store.delete_entry(&id).await?;
    deleted::<VocabEntry>(removed, id)
}
