// Token Mint Operation

use log::trace;

use super::{require_role, validate_owner, CallContext, RegistryStorage};
use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::identity::Identity;
use crate::roles::MINTER_ROLE;
use crate::types::{TokenId, TokenRecord, TypeId};

/// Mint a new token of an existing type
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Call context, the caller must hold the minter role
/// - `owner`: Recipient of the token
/// - `type_id`: Type of the token
///
/// # Returns
/// - `Ok(TokenId)`: The new token ID
/// - `Err(RegistryError)`: `Unauthorized`, `InvalidOwner` or `UnknownType`
pub fn mint<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    owner: &Identity,
    type_id: TypeId,
) -> RegistryResult<TokenId> {
    // Step 1: Authorization
    require_role(storage, &MINTER_ROLE, &ctx.caller)?;

    // Step 2: Input validation
    validate_owner(owner)?;
    if !storage.type_exists(type_id) {
        return Err(RegistryError::UnknownType(type_id));
    }

    // Step 3: Allocate token ID
    let token_id = storage.get_next_token_id();
    let next_token_id = token_id.checked_add(1).ok_or(RegistryError::Overflow)?;

    // Step 4: Store token and advance the counter together
    let token = TokenRecord::new(token_id, *owner, type_id);
    storage.set_token(&token)?;
    storage.set_next_token_id(next_token_id)?;

    trace!("minted token {} of type {} to {}", token_id, type_id, owner);
    storage.emit(RegistryEvent::Minted {
        token_id,
        owner: *owner,
        type_id,
    });

    Ok(token_id)
}
