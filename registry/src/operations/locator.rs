// Metadata Locator Operations
//
// All tokens of a type share one metadata document, so the locator is
// derived from the type id and the collection wide prefix:
// <prefix><type id>.json

use log::trace;

use super::{require_role, validate_locator_prefix, CallContext, RegistryStorage};
use crate::config::LOCATOR_SUFFIX;
use crate::error::{RegistryError, RegistryResult};
use crate::roles::ADMIN_ROLE;
use crate::types::{TokenId, TypeId};

/// Locator of the metadata document of a type
pub fn type_locator(prefix: &str, type_id: TypeId) -> String {
    format!("{}{}{}", prefix, type_id, LOCATOR_SUFFIX)
}

/// Locator of the metadata document of a token, using the current prefix
pub fn locator<S: RegistryStorage + ?Sized>(
    storage: &S,
    token_id: TokenId,
) -> RegistryResult<String> {
    let token = storage
        .get_token(token_id)
        .ok_or(RegistryError::UnknownToken(token_id))?;
    Ok(type_locator(&storage.get_locator_prefix(), token.type_id))
}

/// Replace the locator prefix, effective for every later lookup
pub fn set_locator_prefix<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    prefix: &str,
) -> RegistryResult<()> {
    require_role(storage, &ADMIN_ROLE, &ctx.caller)?;
    validate_locator_prefix(prefix)?;

    trace!("locator prefix set to '{}'", prefix);
    storage.set_locator_prefix(prefix)
}
