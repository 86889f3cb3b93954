//! Learning progress handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::Router;
use uuid::Uuid;

use crate::core::access::Principal;
use crate::core::error::ApiResult;
use crate::core::extractors::{ApiPath, ApiQuery, Authenticated, OwnerQuery};
use crate::core::response::ApiResponse;
use crate::core::validation::ValidJson;
use crate::entities::{RecordReview, UserVocabProgress};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;

use super::{authorize_owned, deleted, listing_scope};

/// Routes under `/progress`
pub struct ProgressDescriptor {
    state: AppState,
}

impl ProgressDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ProgressDescriptor {
    fn entity_type(&self) -> &str {
        "progress"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/progress", get(list_progress))
            .route("/progress/entries/{entry_id}", put(record_review))
            .route("/progress/{id}", get(get_progress).delete(delete_progress))
            .with_state(self.state.clone())
    }
}

async fn owned_progress(
    state: &AppState,
    principal: &Principal,
    id: Uuid,
) -> ApiResult<UserVocabProgress> {
    let found = state.store.get_progress(&id).await?;
    authorize_owned(principal, found, id)
}

/// Record a review of one entry for the calling user
///
/// The entry itself must pass the access controller. Answers 201 when the
/// first review creates the record, 200 afterwards.
pub async fn record_review(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(entry_id): ApiPath<Uuid>,
    ValidJson(review): ValidJson<RecordReview>,
) -> ApiResult<ApiResponse<UserVocabProgress>> {
    let found = state.store.get_entry(&entry_id).await?;
    authorize_owned(&principal, found, entry_id)?;

    let (progress, created) = state
        .store
        .record_review(&principal.id, &entry_id, &review)
        .await?;

    tracing::debug!(
        user_id = %principal.id,
        entry_id = %entry_id,
        mastery_score = progress.mastery_score,
        "review recorded"
    );

    Ok(if created {
        ApiResponse::created("Progress recorded successfully!", progress)
    } else {
        ApiResponse::ok("Progress updated successfully!", progress)
    })
}

pub async fn list_progress(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> ApiResult<ApiResponse<Vec<UserVocabProgress>>> {
    let scope = listing_scope(&principal, query.user_id, "progress records")?;
    let records = state.store.list_progress(&scope.owner_id).await?;

    Ok(ApiResponse::ok("Fetched progress successfully!", records))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<UserVocabProgress>> {
    let progress = owned_progress(&state, &principal, id).await?;
    Ok(ApiResponse::ok("Fetched progress successfully!", progress))
}

pub async fn delete_progress(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    owned_progress(&state, &principal, id).await?;
    let removed = state.store.delete_progress(&id).await?;
    deleted::<UserVocabProgress>(removed, id)
}
