//! Ownership-based access control
//!
//! Every handler that reads or mutates an owned resource funnels through this
//! module. The decision is a pure function of three values: who is asking
//! (`principal id` and `role`) and who owns the target. Nothing here touches
//! storage or HTTP; callers fetch the resource first and map the outcome to a
//! status code afterwards.
//!
//! # Rules
//!
//! - Single resource (fetch, update, delete): allowed when the principal owns
//!   the resource, or when the principal is an administrator. Ownership is
//!   checked first so the recorded [`AccessReason`] says which rule applied.
//! - Listing with an owner filter: the principal's own id is always allowed;
//!   another owner's id is allowed only for administrators. Otherwise the
//!   whole listing is rejected.
//! - Listing without a filter is scoped to the principal, for every role.
//!   Administrators must name an owner to see someone else's resources.
//!
//! # Example
//!
//! ```rust
//! use uuid::Uuid;
//! use vocab::core::access::{authorize, AccessReason, Principal, Role};
//!
//! let owner = Uuid::new_v4();
//! let principal = Principal::new(owner, Role::User);
//!
//! let decision = authorize(&principal, Some(owner));
//! assert!(decision.allowed);
//! assert_eq!(decision.reason, AccessReason::OwnerMatch);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Role carried by an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Whether this role bypasses ownership-based denial
    pub fn is_override(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(AccessError::Unauthenticated),
        }
    }
}

/// The authenticated actor behind a request
///
/// Built by the authentication layer from a verified token and never mutated
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn user(id: Uuid) -> Self {
        Self::new(id, Role::User)
    }

    pub fn admin(id: Uuid) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_override()
    }
}

/// A record that remembers which principal owns it
///
/// `None` means the owner is gone (for example a vocabulary entry whose
/// author deleted their account). Such a resource has no owner to match and
/// only the role override can reach it.
pub trait OwnedResource {
    fn owner_id(&self) -> Option<Uuid>;
}

impl<T: OwnedResource + ?Sized> OwnedResource for &T {
    fn owner_id(&self) -> Option<Uuid> {
        (**self).owner_id()
    }
}

/// Which rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    OwnerMatch,
    RoleOverride,
    Denied,
}

/// Result of evaluating one principal against one owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    const fn owner_match() -> Self {
        Self {
            allowed: true,
            reason: AccessReason::OwnerMatch,
        }
    }

    const fn role_override() -> Self {
        Self {
            allowed: true,
            reason: AccessReason::RoleOverride,
        }
    }

    const fn denied() -> Self {
        Self {
            allowed: false,
            reason: AccessReason::Denied,
        }
    }

    /// Turn a denial into [`AccessError::Forbidden`]
    pub fn into_result(self) -> Result<AccessReason, AccessError> {
        if self.allowed {
            Ok(self.reason)
        } else {
            Err(AccessError::Forbidden)
        }
    }
}

/// Terminal signals of the access-control flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No principal could be resolved for the request
    #[error("authentication required")]
    Unauthenticated,

    /// The target does not exist; ownership is indeterminate
    #[error("resource not found")]
    NotFound,

    /// The principal is neither the owner nor an administrator
    #[error("access to this resource is forbidden")]
    Forbidden,

    /// The requested name is already used by another resource of the same owner
    #[error("name already in use by this owner")]
    Conflict,
}

/// Decide whether `principal` may act on a resource owned by `owner_id`
///
/// Capability-style entry point: it takes plain identifiers so any transport
/// can call it.
pub fn authorize(principal: &Principal, owner_id: Option<Uuid>) -> AccessDecision {
    if owner_id == Some(principal.id) {
        AccessDecision::owner_match()
    } else if principal.role.is_override() {
        AccessDecision::role_override()
    } else {
        AccessDecision::denied()
    }
}

/// [`authorize`] for anything implementing [`OwnedResource`]
pub fn authorize_resource<R: OwnedResource + ?Sized>(
    principal: &Principal,
    resource: &R,
) -> AccessDecision {
    authorize(principal, resource.owner_id())
}

/// Full single-resource pipeline: unauthenticated, then not found, then forbidden
///
/// The order matters. A missing principal is reported before anything else,
/// and a missing resource is reported before ownership is looked at, so a
/// caller never guesses ownership of something that does not exist.
pub fn guard<R: OwnedResource>(
    principal: Option<&Principal>,
    resource: Option<R>,
) -> Result<R, AccessError> {
    let principal = principal.ok_or(AccessError::Unauthenticated)?;
    let resource = resource.ok_or(AccessError::NotFound)?;
    authorize_resource(principal, &resource).into_result()?;
    Ok(resource)
}

/// Owner scope a listing must be restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingScope {
    pub owner_id: Uuid,
    pub reason: AccessReason,
}

/// Decide which owner's collection a listing may return
///
/// Absence of a filter never means "everything": it means the principal's
/// own resources, administrators included.
pub fn authorize_listing(
    principal: &Principal,
    requested_owner: Option<Uuid>,
) -> Result<ListingScope, AccessError> {
    let owner_id = requested_owner.unwrap_or(principal.id);
    let decision = authorize(principal, Some(owner_id));
    let reason = decision.into_result()?;
    Ok(ListingScope { owner_id, reason })
}

/// Check a name against the names one owner already uses
///
/// `existing` yields `(id, name)` pairs for the owner's resources. `current`
/// is the id of the resource being renamed, which never conflicts with
/// itself, so renaming to the current name is a no-op rather than an error.
pub fn ensure_unique_within_owner<'a, I>(
    existing: I,
    name: &str,
    current: Option<Uuid>,
) -> Result<(), AccessError>
where
    I: IntoIterator<Item = (Uuid, &'a str)>,
{
    let taken = existing
        .into_iter()
        .any(|(id, other)| other == name && Some(id) != current);

    if taken {
        Err(AccessError::Conflict)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        owner: Option<Uuid>,
    }

    impl OwnedResource for Doc {
        fn owner_id(&self) -> Option<Uuid> {
            self.owner
        }
    }

    fn ids() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_owner_is_allowed() {
        let (u1, _) = ids();
        let decision = authorize(&Principal::user(u1), Some(u1));
        assert!(decision.allowed);
        assert_eq!(decision.reason, AccessReason::OwnerMatch);
    }

    #[test]
    fn test_non_owner_user_is_forbidden() {
        let (u1, u2) = ids();
        let decision = authorize(&Principal::user(u1), Some(u2));
        assert!(!decision.allowed);
        assert_eq!(decision.reason, AccessReason::Denied);
        assert_eq!(decision.into_result(), Err(AccessError::Forbidden));
    }

    #[test]
    fn test_admin_overrides_foreign_ownership() {
        let (admin, u2) = ids();
        let decision = authorize(&Principal::admin(admin), Some(u2));
        assert!(decision.allowed);
        assert_eq!(decision.reason, AccessReason::RoleOverride);
    }

    #[test]
    fn test_admin_on_own_resource_records_owner_match() {
        let (admin, _) = ids();
        let decision = authorize(&Principal::admin(admin), Some(admin));
        assert_eq!(decision.reason, AccessReason::OwnerMatch);
    }

    #[test]
    fn test_orphaned_resource_only_reachable_by_admin() {
        let (u1, admin) = ids();
        let orphan = Doc { owner: None };

        assert!(!authorize_resource(&Principal::user(u1), &orphan).allowed);
        assert_eq!(
            authorize_resource(&Principal::admin(admin), &orphan).reason,
            AccessReason::RoleOverride
        );
    }

    #[test]
    fn test_allowed_implies_owner_or_admin() {
        let (u1, u2) = ids();
        let owners = [Some(u1), Some(u2), None];
        let principals = [
            Principal::user(u1),
            Principal::user(u2),
            Principal::admin(u1),
            Principal::admin(Uuid::new_v4()),
        ];

        for principal in &principals {
            for owner in owners {
                let decision = authorize(principal, owner);
                let expected = owner == Some(principal.id) || principal.is_admin();
                assert_eq!(decision.allowed, expected, "{principal:?} on {owner:?}");
            }
        }
    }

    #[test]
    fn test_decision_is_idempotent() {
        let (u1, u2) = ids();
        let principal = Principal::user(u1);
        assert_eq!(authorize(&principal, Some(u2)), authorize(&principal, Some(u2)));
        assert_eq!(authorize(&principal, Some(u1)), authorize(&principal, Some(u1)));
    }

    #[test]
    fn test_guard_order_unauthenticated_first() {
        let result = guard::<Doc>(None, None);
        assert_eq!(result.err(), Some(AccessError::Unauthenticated));
    }

    #[test]
    fn test_guard_not_found_before_authorization() {
        let (u1, _) = ids();
        let result = guard::<Doc>(Some(&Principal::user(u1)), None);
        assert_eq!(result.err(), Some(AccessError::NotFound));
    }

    #[test]
    fn test_guard_foreign_resource_is_forbidden_not_not_found() {
        let (u1, u2) = ids();
        let result = guard(Some(&Principal::user(u1)), Some(Doc { owner: Some(u2) }));
        assert_eq!(result.err(), Some(AccessError::Forbidden));
    }

    #[test]
    fn test_guard_returns_resource_when_allowed() {
        let (u1, _) = ids();
        let doc = guard(Some(&Principal::user(u1)), Some(Doc { owner: Some(u1) }))
            .expect("owner should pass");
        assert_eq!(doc.owner, Some(u1));
    }

    #[test]
    fn test_listing_without_filter_scopes_to_self_for_every_role() {
        let (u1, admin) = ids();

        let scope = authorize_listing(&Principal::user(u1), None).unwrap();
        assert_eq!(scope.owner_id, u1);

        let scope = authorize_listing(&Principal::admin(admin), None).unwrap();
        assert_eq!(scope.owner_id, admin);
        assert_eq!(scope.reason, AccessReason::OwnerMatch);
    }

    #[test]
    fn test_listing_own_filter_allowed() {
        let (u1, _) = ids();
        let scope = authorize_listing(&Principal::user(u1), Some(u1)).unwrap();
        assert_eq!(scope.owner_id, u1);
    }

    #[test]
    fn test_listing_foreign_filter_forbidden_for_user() {
        let (u1, u2) = ids();
        let result = authorize_listing(&Principal::user(u1), Some(u2));
        assert_eq!(result, Err(AccessError::Forbidden));
    }

    #[test]
    fn test_listing_foreign_filter_allowed_for_admin() {
        let (admin, u2) = ids();
        let scope = authorize_listing(&Principal::admin(admin), Some(u2)).unwrap();
        assert_eq!(scope.owner_id, u2);
        assert_eq!(scope.reason, AccessReason::RoleOverride);
    }

    #[test]
    fn test_unique_name_conflict() {
        let (a, b) = ids();
        let existing = [(a, "Verbs"), (b, "Nouns")];
        assert_eq!(
            ensure_unique_within_owner(existing, "Nouns", None),
            Err(AccessError::Conflict)
        );
        assert!(ensure_unique_within_owner(existing, "Adjectives", None).is_ok());
    }

    #[test]
    fn test_rename_to_same_name_is_not_a_conflict() {
        let (a, b) = ids();
        let existing = [(a, "Verbs"), (b, "Nouns")];
        assert!(ensure_unique_within_owner(existing, "Verbs", Some(a)).is_ok());
    }

    #[test]
    fn test_rename_onto_sibling_name_conflicts() {
        let (a, b) = ids();
        let existing = [(a, "Verbs"), (b, "Nouns")];
        assert_eq!(
            ensure_unique_within_owner(existing, "Nouns", Some(a)),
            Err(AccessError::Conflict)
        );
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::User);
    }
}
