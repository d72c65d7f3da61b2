// Registry Query Operations
// This module contains read-only query functions.

use super::RegistryStorage;
use crate::config::FIRST_TOKEN_ID;
use crate::error::{RegistryError, RegistryResult};
use crate::identity::Identity;
use crate::roles::RoleId;
use crate::types::{TokenId, TokenRecord, TypeId, TypeRecord};

// ========================================
// Type Queries
// ========================================

/// Get the record of a type
///
/// # Returns
/// - `Ok(TypeRecord)`: The stored record, as it was added
/// - `Err(RegistryError::UnknownType)`: No type with this id
pub fn get_type<S: RegistryStorage + ?Sized>(
    storage: &S,
    id: TypeId,
) -> RegistryResult<TypeRecord> {
    storage.get_type(id).ok_or(RegistryError::UnknownType(id))
}

/// Number of registered types
pub fn type_count<S: RegistryStorage + ?Sized>(storage: &S) -> usize {
    storage.type_ids().len()
}

// ========================================
// Token Queries
// ========================================

/// Get the full record of a token
///
/// # Returns
/// - `Ok(TokenRecord)`: The token record
/// - `Err(RegistryError::UnknownToken)`: No token with this id
pub fn get_token<S: RegistryStorage + ?Sized>(
    storage: &S,
    token_id: TokenId,
) -> RegistryResult<TokenRecord> {
    storage
        .get_token(token_id)
        .ok_or(RegistryError::UnknownToken(token_id))
}

pub fn level<S: RegistryStorage + ?Sized>(storage: &S, token_id: TokenId) -> RegistryResult<u32> {
    get_token(storage, token_id).map(|token| token.level)
}

pub fn counter<S: RegistryStorage + ?Sized>(storage: &S, token_id: TokenId) -> RegistryResult<u64> {
    get_token(storage, token_id).map(|token| token.counter)
}

/// Owner recorded when the token was minted
pub fn owner_of<S: RegistryStorage + ?Sized>(
    storage: &S,
    token_id: TokenId,
) -> RegistryResult<Identity> {
    get_token(storage, token_id).map(|token| token.owner)
}

/// Check if a token exists
pub fn exists<S: RegistryStorage + ?Sized>(storage: &S, token_id: TokenId) -> bool {
    if token_id < FIRST_TOKEN_ID {
        return false;
    }
    storage.token_exists(token_id)
}

/// Number of tokens minted so far
///
/// Ids are dense, so this is derived from the id counter.
pub fn total_supply<S: RegistryStorage + ?Sized>(storage: &S) -> u64 {
    storage
        .get_next_token_id()
        .saturating_sub(FIRST_TOKEN_ID)
}

// ========================================
// Role Queries
// ========================================

pub fn role_member_count<S: RegistryStorage + ?Sized>(
    storage: &S,
    role: &RoleId,
) -> usize {
    storage.role_members(role).len()
}
