// Type Catalog Operations
// Token types are created once by an admin and never change afterwards.

use log::trace;

use super::{require_role, validate_type_record, CallContext, RegistryStorage};
use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::roles::ADMIN_ROLE;
use crate::types::{TypeId, TypeRecord};

/// Register a new token type
///
/// # Returns
/// - `Ok(())` once the record is stored
/// - `Err(RegistryError::Unauthorized)` if the caller is not an admin
/// - `Err(RegistryError::DuplicateType)` if `id` already has a record
/// - a validation error if the record is malformed
pub fn add_type<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    id: TypeId,
    record: TypeRecord,
) -> RegistryResult<()> {
    // Step 1: Authorization
    require_role(storage, &ADMIN_ROLE, &ctx.caller)?;

    // Step 2: Types are write-once
    if storage.type_exists(id) {
        return Err(RegistryError::DuplicateType(id));
    }

    // Step 3: Record validation
    validate_type_record(&record, storage.kind())?;

    // Step 4: Store verbatim
    trace!("adding type {} ({})", id, record.name);
    storage.set_type(id, &record)?;
    storage.emit(RegistryEvent::TypeAdded { id });

    Ok(())
}
