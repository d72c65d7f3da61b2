// Batch Execution
//
// A batch is an ordered list of operations applied as one unit:
// - every operation runs with the batch caller as its caller
// - operations see the writes of the operations before them
// - the first failure discards the whole batch
// Writes are staged in an overlay and committed only once every
// operation has succeeded.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::{
    add_type, grant_role, level_up, mint, revoke_role, set_locator_prefix, update,
    update_counter, validate_batch_size, CallContext, RegistryStorage,
};
use crate::error::{RegistryError, RegistryResult};
use crate::identity::Identity;
use crate::overlay::transact;
use crate::roles::RoleId;
use crate::serializer::Serializer;
use crate::types::{TokenId, TypeId, TypeRecord};

/// One mutating call, as carried inside a batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    AddType {
        id: TypeId,
        record: TypeRecord,
    },
    Mint {
        owner: Identity,
        type_id: TypeId,
    },
    LevelUp {
        token_id: TokenId,
        level: u32,
    },
    UpdateCounter {
        token_id: TokenId,
        value: u64,
    },
    Update {
        token_id: TokenId,
        level: u32,
        counter: u64,
    },
    SetLocatorPrefix {
        prefix: String,
    },
    GrantRole {
        #[serde(with = "hex::serde")]
        role: RoleId,
        account: Identity,
    },
    RevokeRole {
        #[serde(with = "hex::serde")]
        role: RoleId,
        account: Identity,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddType { .. } => "add_type",
            Operation::Mint { .. } => "mint",
            Operation::LevelUp { .. } => "level_up",
            Operation::UpdateCounter { .. } => "update_counter",
            Operation::Update { .. } => "update",
            Operation::SetLocatorPrefix { .. } => "set_locator_prefix",
            Operation::GrantRole { .. } => "grant_role",
            Operation::RevokeRole { .. } => "revoke_role",
        }
    }
}

/// Apply a single operation
///
/// Returns the new token id for `Mint`, `None` for everything else.
pub fn apply_operation<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    operation: &Operation,
) -> RegistryResult<Option<TokenId>> {
    match operation {
        Operation::AddType { id, record } => add_type(storage, ctx, *id, record.clone())?,
        Operation::Mint { owner, type_id } => return mint(storage, ctx, owner, *type_id).map(Some),
        Operation::LevelUp { token_id, level } => level_up(storage, ctx, *token_id, *level)?,
        Operation::UpdateCounter { token_id, value } => {
            update_counter(storage, ctx, *token_id, *value)?
        }
        Operation::Update {
            token_id,
            level,
            counter,
        } => update(storage, ctx, *token_id, *level, *counter)?,
        Operation::SetLocatorPrefix { prefix } => set_locator_prefix(storage, ctx, prefix)?,
        Operation::GrantRole { role, account } => grant_role(storage, ctx, role, account)?,
        Operation::RevokeRole { role, account } => revoke_role(storage, ctx, role, account)?,
    }
    Ok(None)
}

/// Execute a batch atomically
///
/// # Returns
/// - `Ok(Vec<TokenId>)`: Ids of the tokens minted by the batch, in order
/// - `Err(RegistryError::EmptyBatch)` / `Err(RegistryError::BatchTooLarge)`
/// - `Err(RegistryError::SubOperationFailed)`: The first failing operation,
///   nothing from the batch was applied
pub fn execute_batch<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    operations: &[Operation],
    max_batch_size: usize,
) -> RegistryResult<Vec<TokenId>> {
    validate_batch_size(operations.len(), max_batch_size)?;

    transact(storage, |overlay| {
        let mut minted = Vec::new();
        for (index, operation) in operations.iter().enumerate() {
            trace!("batch #{}: {}", index, operation.name());
            match apply_operation(overlay, ctx, operation) {
                Ok(Some(token_id)) => minted.push(token_id),
                Ok(None) => {}
                Err(e) => {
                    debug!(
                        "batch #{} ({}) failed, discarding {} staged operations: {}",
                        index,
                        operation.name(),
                        index,
                        e
                    );
                    return Err(e.at_index(index));
                }
            }
        }
        Ok(minted)
    })
}

/// Decode every entry of an encoded batch
///
/// Nothing is executed if any entry is malformed; the error carries the index
/// of the first malformed entry.
pub fn decode_operations<B: AsRef<[u8]>>(encoded: &[B]) -> RegistryResult<Vec<Operation>> {
    encoded
        .iter()
        .enumerate()
        .map(|(index, bytes)| {
            Operation::from_bytes(bytes.as_ref())
                .map_err(|e| RegistryError::from(e).at_index(index))
        })
        .collect()
}
