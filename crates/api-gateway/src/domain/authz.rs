//! # Authorization & Tenant Scoping
//!
//! | Check | Rule |
//! |---|---|
//! | read | admin, or `resource.group_id == user.group_id` |
//! | write | same as read |
//! | create | user must have a group; the resource is stamped with it |
//!
//! Failed reads surface as not-found (single) or omission (list). Failed
//! writes surface as forbidden.

use crate::domain::error::GatewayError;
use shared_types::{AuthenticatedUser, GroupId, Resource, UNASSIGNED_GROUP};

/// Message for principals that cannot create resources.
pub const NO_GROUP_MESSAGE: &str = "Current user does not belong to any group. \
     Please assign the user to a group before performing this action";

pub fn can_read<E: Resource>(user: &AuthenticatedUser, resource: &E) -> bool {
    user.admin || resource.group_id() == user.group_id
}

pub fn can_write<E: Resource>(user: &AuthenticatedUser, resource: &E) -> bool {
    can_read(user, resource)
}

/// Group to scope backend lookups with. Admins look across all tenants.
pub fn read_scope(user: &AuthenticatedUser) -> GroupId {
    if user.admin {
        UNASSIGNED_GROUP
    } else {
        user.group_id
    }
}

/// Prepare a client-supplied resource for creation.
///
/// The owning group always comes from the principal, never from the body,
/// and any client-supplied id is discarded.
pub fn stamp_for_create<E: Resource>(
    user: &AuthenticatedUser,
    resource: &mut E,
) -> Result<(), GatewayError> {
    if !user.has_group() {
        return Err(GatewayError::unauthorized(NO_GROUP_MESSAGE));
    }
    resource.set_group_id(user.group_id);
    resource.set_id(String::new());
    Ok(())
}
