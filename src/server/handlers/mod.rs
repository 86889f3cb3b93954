//! REST handlers, one module per resource
//!
//! Every handler that touches an owned record follows the same order:
//! resolve the principal, fetch the record, run the access controller,
//! then read or mutate through the store.

pub mod auth;
pub mod categories;
pub mod languages;
pub mod progress;
pub mod vocab_entries;

use axum::http::StatusCode;
use uuid::Uuid;

use crate::core::access::{self, AccessError, ListingScope, OwnedResource, Principal};
use crate::core::entity::Entity;
use crate::core::error::{ApiError, ApiResult};

pub use auth::AuthDescriptor;
pub use categories::CategoryDescriptor;
pub use languages::LanguageDescriptor;
pub use progress::ProgressDescriptor;
pub use vocab_entries::VocabEntryDescriptor;

/// Run the single-resource guard on a fetched record
pub(crate) fn authorize_owned<R>(principal: &Principal, resource: Option<R>, id: Uuid) -> ApiResult<R>
where
    R: OwnedResource + Entity,
{
    let entity_type = R::resource_name_singular();
    access::guard(Some(principal), resource).map_err(|e| {
        if e == AccessError::Forbidden {
            tracing::warn!(
                principal_id = %principal.id,
                resource = entity_type,
                resource_id = %id,
                "access denied"
            );
        }
        ApiError::from_access(e, entity_type, id)
    })
}

/// Answer a delete: 204, or 404 when the record vanished after the guard ran
pub(crate) fn deleted<R: Entity>(removed: bool, id: Uuid) -> ApiResult<StatusCode> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(R::resource_name_singular(), id))
    }
}

/// Resolve the owner a listing is restricted to
pub(crate) fn listing_scope(
    principal: &Principal,
    requested_owner: Option<Uuid>,
    collection: &str,
) -> ApiResult<ListingScope> {
    access::authorize_listing(principal, requested_owner).map_err(|_| {
        tracing::warn!(
            principal_id = %principal.id,
            requested_owner = ?requested_owner,
            collection,
            "listing denied"
        );
        ApiError::forbidden(format!(
            "You do not have permission to access {} of other users.",
            collection
        ))
    })
}
