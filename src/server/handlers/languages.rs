//! Read-only language reference data

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult};
use crate::core::extractors::{ApiPath, Authenticated};
use crate::core::response::ApiResponse;
use crate::entities::Language;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;

/// Routes under `/languages`
pub struct LanguageDescriptor {
    state: AppState,
}

impl LanguageDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for LanguageDescriptor {
    fn entity_type(&self) -> &str {
        "language"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/languages", get(list_languages))
            .route("/languages/{id}", get(get_language))
            .with_state(self.state.clone())
    }
}

pub async fn list_languages(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
) -> ApiResult<ApiResponse<Vec<Language>>> {
    let languages = state.store.list_languages().await?;
    Ok(ApiResponse::ok("Fetched languages successfully!", languages))
}

pub async fn get_language(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<Language>> {
    let language = state
        .store
        .get_language(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("language", id))?;

    Ok(ApiResponse::ok("Fetched language successfully!", language))
}
