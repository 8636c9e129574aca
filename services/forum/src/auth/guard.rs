//! Authorization guard
//!
//! A fixed capability decision table evaluated against an authenticated
//! principal. Pure policy check: no IO, no panics, no business logic. The
//! role examined is always the caller's own, and ownership is always the
//! resource's stored author identity.

use uuid::Uuid;

use crate::models::Role;

use super::Principal;

/// Named access-control rule required by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any authenticated principal may proceed.
    AnyAuthenticatedUser,
    /// Only the resource owner may proceed.
    ResourceOwnerOnly,
    /// The resource owner or any admin may proceed.
    OwnerOrAdmin,
    /// Only an admin may proceed.
    AdminOnly,
}

/// Reason an authorization decision came back negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deny {
    NotOwner,
    NotOwnerOrAdmin,
    NotAdmin,
}

/// Evaluate the decision table for a principal.
///
/// `owner` is the resource's stored owner identity where the capability
/// needs one; ownership capabilities deny when it is absent.
pub fn authorize(
    principal: &Principal,
    required: Capability,
    owner: Option<Uuid>,
) -> Result<(), Deny> {
    let owns = owner.is_some_and(|owner| principal.id() == owner);
    let is_admin = principal.role() == Role::Admin;

    match required {
        Capability::AnyAuthenticatedUser => Ok(()),
        Capability::ResourceOwnerOnly if owns => Ok(()),
        Capability::ResourceOwnerOnly => Err(Deny::NotOwner),
        Capability::OwnerOrAdmin if owns || is_admin => Ok(()),
        Capability::OwnerOrAdmin => Err(Deny::NotOwnerOrAdmin),
        Capability::AdminOnly if is_admin => Ok(()),
        Capability::AdminOnly => Err(Deny::NotAdmin),
    }
}
