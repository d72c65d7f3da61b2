// Access Control Operations
//
// Permission model:
// - The first administrator starts with the admin and minter roles
// - The admin role manages membership of every role, itself included
// - Granting a held role or revoking an unheld one succeeds without an event
// - Any account may renounce its own roles

use super::{require_role, validate_owner, CallContext, RegistryStorage};
use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::identity::Identity;
use crate::roles::{RoleId, ADMIN_ROLE, MINTER_ROLE};

/// Roles held by the first administrator of a fresh registry
pub const SEEDED_ROLES: [RoleId; 2] = [ADMIN_ROLE, MINTER_ROLE];

/// Give the seeded roles to the first administrator of a fresh registry
pub fn seed_admin<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    admin: &Identity,
) -> RegistryResult<()> {
    validate_owner(admin)?;
    for role in &SEEDED_ROLES {
        set_membership(storage, role, admin, true)?;
    }
    Ok(())
}

/// Grant `role` to `account`
///
/// # Returns
/// * `Ok(())` on success, or if the account already holds the role
/// * `Err(RegistryError::Unauthorized)` if the caller is not an admin
pub fn grant_role<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    role: &RoleId,
    account: &Identity,
) -> RegistryResult<()> {
    require_role(storage, &ADMIN_ROLE, &ctx.caller)?;
    set_membership(storage, role, account, true)
}

/// Revoke `role` from `account`
///
/// # Returns
/// * `Ok(())` on success, or if the account does not hold the role
/// * `Err(RegistryError::Unauthorized)` if the caller is not an admin
pub fn revoke_role<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    role: &RoleId,
    account: &Identity,
) -> RegistryResult<()> {
    require_role(storage, &ADMIN_ROLE, &ctx.caller)?;
    set_membership(storage, role, account, false)
}

/// Drop one of the caller's own roles
///
/// `account` must be the caller; it is repeated so a host cannot renounce a
/// role for the wrong account by mistake.
pub fn renounce_role<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    role: &RoleId,
    account: &Identity,
) -> RegistryResult<()> {
    if *account != ctx.caller {
        return Err(RegistryError::Unauthorized {
            account: ctx.caller,
            role: *role,
        });
    }
    set_membership(storage, role, account, false)
}

fn set_membership<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    role: &RoleId,
    account: &Identity,
    granted: bool,
) -> RegistryResult<()> {
    if storage.has_role(role, account) == granted {
        return Ok(());
    }

    storage.set_role(role, account, granted)?;
    storage.emit(RegistryEvent::RoleChanged {
        role: *role,
        identity: *account,
        granted,
    });
    Ok(())
}
