//! Registration, login and account management

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use crate::core::access::{Principal, Role};
use crate::core::error::{ApiResult, AuthError};
use crate::core::extractors::{ApiPath, Authenticated};
use crate::core::password::{hash_password, verify_password};
use crate::core::response::ApiResponse;
use crate::core::validation::ValidJson;
use crate::entities::{AuthPayload, LoginUser, RegisterUser, UpdateUser, User};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;

use super::{authorize_owned, deleted};

/// Routes under `/auth`
pub struct AuthDescriptor {
    state: AppState,
}

impl AuthDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for AuthDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .route("/auth/me", get(get_me).put(update_me).delete(delete_me))
            .route("/auth/users/{id}", get(get_user).delete(delete_user))
            .with_state(self.state.clone())
    }
}

pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RegisterUser>,
) -> ApiResult<ApiResponse<AuthPayload>> {
    let role = if state.config.auth.is_admin_email(&body.email) {
        Role::Admin
    } else {
        Role::User
    };

    let password_hash = hash_password(&body.password)?;
    let user = state
        .store
        .create_user(User::new(
            body.name,
            body.email,
            password_hash,
            role,
            body.current_language_id,
        ))
        .await?;

    let token = state.tokens.issue(user.id, &user.email, user.role)?;
    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    Ok(ApiResponse::created(
        "User registered successfully!",
        AuthPayload { user, token },
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoginUser>,
) -> ApiResult<ApiResponse<AuthPayload>> {
    let user = state
        .store
        .find_user_by_email(&body.email)
        .await?
        .filter(|user| verify_password(&body.password, &user.password_hash))
        .ok_or_else(|| {
            tracing::info!("login rejected");
            AuthError::InvalidCredentials
        })?;

    let token = state.tokens.issue(user.id, &user.email, user.role)?;
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(ApiResponse::ok("Login successful!", AuthPayload { user, token }))
}

pub async fn get_me(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
) -> ApiResult<ApiResponse<User>> {
    let found = state.store.get_user(&principal.id).await?;
    let user = authorize_owned(&principal, found, principal.id)?;

    Ok(ApiResponse::ok("Fetched user profile successfully!", user))
}

pub async fn update_me(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ValidJson(body): ValidJson<UpdateUser>,
) -> ApiResult<ApiResponse<User>> {
    let found = state.store.get_user(&principal.id).await?;
    let mut user = authorize_owned(&principal, found, principal.id)?;

    if let Some(name) = body.name {
        user.name = name;
    }
    if let Some(email) = body.email {
        user.email = email;
    }
    if let Some(password) = body.password {
        user.password_hash = hash_password(&password)?;
    }
    if let Some(language) = body.current_language_id {
        user.current_language_id = language;
    }
    user.touch();

    let user = state.store.update_user(user).await?;
    Ok(ApiResponse::ok("User updated successfully!", user))
}

pub async fn delete_me(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
) -> ApiResult<StatusCode> {
    remove_account(&state, &principal, principal.id).await
}

pub async fn get_user(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<User>> {
    let found = state.store.get_user(&id).await?;
    let user = authorize_owned(&principal, found, id)?;

    Ok(ApiResponse::ok("Fetched user successfully!", user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    remove_account(&state, &principal, id).await
}

async fn remove_account(
    state: &AppState,
    principal: &Principal,
    id: Uuid,
) -> ApiResult<StatusCode> {
    let found = state.store.get_user(&id).await?;
    authorize_owned(principal, found, id)?;

    let removed = state.store.delete_user(&id).await?;
    if removed {
        tracing::info!(user_id = %id, deleted_by = %principal.id, "user deleted");
    }
    deleted::<User>(removed, id)
}
