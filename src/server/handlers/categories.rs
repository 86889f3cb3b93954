//! Category handlers, including entry membership

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use crate::core::access::{Principal, authorize_resource};
use crate::core::error::{ApiError, ApiResult};
use crate::core::extractors::{ApiPath, ApiQuery, Authenticated, OwnerQuery};
use crate::core::response::ApiResponse;
use crate::core::validation::ValidJson;
use crate::entities::{Category, CreateCategory, UpdateCategory, VocabCategory, VocabEntry};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;

use super::{authorize_owned, deleted, listing_scope};

/// Routes under `/categories`
pub struct CategoryDescriptor {
    state: AppState,
}

impl CategoryDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CategoryDescriptor {
    fn entity_type(&self) -> &str {
        "category"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/categories", post(create_category).get(list_categories))
            .route(
                "/categories/{id}",
                get(get_category).put(update_category).delete(delete_category),
            )
            .route("/categories/{id}/entries", get(list_category_entries))
            .route(
                "/categories/{id}/entries/{entry_id}",
                post(add_category_entry).delete(remove_category_entry),
            )
            .with_state(self.state.clone())
    }
}

async fn owned_category(state: &AppState, principal: &Principal, id: Uuid) -> ApiResult<Category> {
    let found = state.store.get_category(&id).await?;
    authorize_owned(principal, found, id)
}

pub async fn create_category(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ValidJson(body): ValidJson<CreateCategory>,
) -> ApiResult<ApiResponse<Category>> {
    let category = state
        .store
        .create_category(Category::new(principal.id, body.name))
        .await?;

    Ok(ApiResponse::created("Category created successfully!", category))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> ApiResult<ApiResponse<Vec<Category>>> {
    let scope = listing_scope(&principal, query.user_id, "categories")?;
    let categories = state.store.list_categories(&scope.owner_id).await?;

    Ok(ApiResponse::ok("Fetched categories successfully!", categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<Category>> {
    let category = owned_category(&state, &principal, id).await?;
    Ok(ApiResponse::ok("Fetched category successfully!", category))
}

pub async fn update_category(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(body): ValidJson<UpdateCategory>,
) -> ApiResult<ApiResponse<Category>> {
    let mut category = owned_category(&state, &principal, id).await?;

    if let Some(name) = body.name {
        category.name = name;
    }
    category.touch();

    let category = state.store.update_category(category).await?;
    Ok(ApiResponse::ok("Category updated successfully!", category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    owned_category(&state, &principal, id).await?;
    let removed = state.store.delete_category(&id).await?;
    deleted::<Category>(removed, id)
}

pub async fn list_category_entries(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<Vec<VocabEntry>>> {
    owned_category(&state, &principal, id).await?;

    let entries = state
        .store
        .list_category_entries(&id)
        .await?
        .into_iter()
        .filter(|entry| authorize_resource(&principal, entry).allowed)
        .collect();

    Ok(ApiResponse::ok("Fetched category entries successfully!", entries))
}

pub async fn add_category_entry(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath((id, entry_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<ApiResponse<VocabCategory>> {
    owned_category(&state, &principal, id).await?;
    let found = state.store.get_entry(&entry_id).await?;
    authorize_owned(&principal, found, entry_id)?;

    let membership = state.store.add_to_category(&id, &entry_id).await?;
    Ok(ApiResponse::created(
        "Entry added to category successfully!",
        membership,
    ))
}

pub async fn remove_category_entry(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath((id, entry_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    owned_category(&state, &principal, id).await?;

    if state.store.remove_from_category(&id, &entry_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("category entry", entry_id))
    }
}
