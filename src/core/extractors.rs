//! Axum extractors for principals, paths and query strings
//!
//! Rejections are turned into [`ApiError`] so that malformed ids and
//! missing tokens produce the same envelope as every other failure.

use axum::extract::{FromRef, FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::access::Principal;
use crate::core::auth::AuthProvider;
use crate::core::error::{ApiError, ValidationError};

/// The authenticated principal of the current request
///
/// Resolved through the [`AuthProvider`] found in the router state.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub Principal);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
    Arc<dyn AuthProvider>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let provider = Arc::<dyn AuthProvider>::from_ref(state);
        match provider.authenticate(&parts.headers).await {
            Ok(principal) => Ok(Authenticated(principal)),
            Err(e) => {
                tracing::debug!(path = %parts.uri.path(), error = %e, "authentication failed");
                Err(e)
            }
        }
    }
}

/// Path extractor that reports malformed segments as validation errors
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| ApiPath(value))
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidParameter {
                    name: "path".to_string(),
                    message: e.body_text(),
                })
            })
    }
}

/// Query extractor that reports malformed parameters as validation errors
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidParameter {
                    name: "query".to_string(),
                    message: e.body_text(),
                })
            })
    }
}

/// `?user_id=` filter accepted by every owner-scoped listing
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OwnerQuery {
    pub user_id: Option<Uuid>,
}

/// Listing filter for vocabulary entries
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EntryQuery {
    pub user_id: Option<Uuid>,
    pub language_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::access::Role;
    use crate::core::error::ApiResult;
    use async_trait::async_trait;
    use axum::http::{HeaderMap, Request, StatusCode};

    struct FixedProvider(Option<Principal>);

    #[async_trait]
    impl AuthProvider for FixedProvider {
        async fn authenticate(&self, _headers: &HeaderMap) -> ApiResult<Principal> {
            self.0
                .ok_or_else(|| ApiError::unauthenticated("Access denied. No token provided."))
        }
    }

    #[derive(Clone)]
    struct TestState {
        auth: Arc<dyn AuthProvider>,
    }

    impl FromRef<TestState> for Arc<dyn AuthProvider> {
        fn from_ref(state: &TestState) -> Self {
            state.auth.clone()
        }
    }

    fn parts(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_authenticated_resolves_principal() {
        let id = Uuid::new_v4();
        let state = TestState {
            auth: Arc::new(FixedProvider(Some(Principal::new(id, Role::Admin)))),
        };

        let Authenticated(principal) = Authenticated::from_request_parts(&mut parts("/"), &state)
            .await
            .unwrap();
        assert_eq!(principal.id, id);
        assert!(principal.is_admin());
    }

    #[tokio::test]
    async fn test_authenticated_rejects_without_principal() {
        let state = TestState {
            auth: Arc::new(FixedProvider(None)),
        };

        let err = Authenticated::from_request_parts(&mut parts("/"), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_query_parses_owner_filter() {
        let id = Uuid::new_v4();
        let ApiQuery(query) =
            ApiQuery::<EntryQuery>::from_request_parts(&mut parts(&format!("/?user_id={}", id)), &())
                .await
                .ok()
                .unwrap();
        assert_eq!(query.user_id, Some(id));
        assert_eq!(query.language_id, None);
    }

    #[tokio::test]
    async fn test_query_rejects_malformed_uuid() {
        let err = ApiQuery::<OwnerQuery>::from_request_parts(&mut parts("/?user_id=abc"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
