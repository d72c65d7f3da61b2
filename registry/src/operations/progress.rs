// Token Progression Operations
//
// A token's state is its (level, counter) pair. Both only move forward:
// - level never decreases and never exceeds the max level of its type
// - counter never decreases
// Setting a value equal to the current one is accepted.

use log::trace;

use super::{require_role, CallContext, RegistryStorage};
use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::roles::OPERATOR_ROLE;
use crate::types::{TokenId, TokenRecord, TypeRecord};

/// Check a level transition against the monotonicity and max level rules
pub fn check_level(current: u32, requested: u32, max_level: u32) -> RegistryResult<()> {
    if requested < current {
        return Err(RegistryError::LevelDecrease { current, requested });
    }
    if requested > max_level {
        return Err(RegistryError::LevelExceedsMax {
            max: max_level,
            requested,
        });
    }
    Ok(())
}

/// Check a counter transition against the monotonicity rule
pub fn check_counter(current: u64, requested: u64) -> RegistryResult<()> {
    if requested < current {
        return Err(RegistryError::CounterDecrease { current, requested });
    }
    Ok(())
}

/// Authorize an operator call and load the token with its type
fn load_for_update<S: RegistryStorage + ?Sized>(
    storage: &S,
    ctx: &CallContext,
    token_id: TokenId,
) -> RegistryResult<(TokenRecord, TypeRecord)> {
    require_role(storage, &OPERATOR_ROLE, &ctx.caller)?;

    let token = storage
        .get_token(token_id)
        .ok_or(RegistryError::UnknownToken(token_id))?;
    let token_type = storage
        .get_type(token.type_id)
        .ok_or(RegistryError::UnknownType(token.type_id))?;

    Ok((token, token_type))
}

// ========================================
// Level Up
// ========================================

/// Raise the level of a token
///
/// # Returns
/// * `Ok(())` on success, including when `new_level` equals the current level
/// * `Err(RegistryError::Unauthorized)` if the caller is not an operator
/// * `Err(RegistryError::UnknownToken)` if the token doesn't exist
/// * `Err(RegistryError::LevelDecrease)` if `new_level` is below the current level
/// * `Err(RegistryError::LevelExceedsMax)` if `new_level` is above the type max level
pub fn level_up<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    token_id: TokenId,
    new_level: u32,
) -> RegistryResult<()> {
    let (mut token, token_type) = load_for_update(storage, ctx, token_id)?;
    check_level(token.level, new_level, token_type.max_level)?;

    if token.level != new_level {
        trace!("token {}: level {} -> {}", token_id, token.level, new_level);
        token.level = new_level;
        storage.set_token(&token)?;
    }

    storage.emit(RegistryEvent::LevelUp {
        token_id,
        new_level,
    });
    Ok(())
}

// ========================================
// Counter Update
// ========================================

/// Raise the secondary counter (games played / enemies hit) of a token
///
/// # Returns
/// * `Ok(())` on success, including when `new_value` equals the current value
/// * `Err(RegistryError::Unauthorized)` if the caller is not an operator
/// * `Err(RegistryError::UnknownToken)` if the token doesn't exist
/// * `Err(RegistryError::CounterDecrease)` if `new_value` is below the current value
pub fn update_counter<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    token_id: TokenId,
    new_value: u64,
) -> RegistryResult<()> {
    let (mut token, _) = load_for_update(storage, ctx, token_id)?;
    check_counter(token.counter, new_value)?;

    if token.counter != new_value {
        trace!("token {}: counter {} -> {}", token_id, token.counter, new_value);
        token.counter = new_value;
        storage.set_token(&token)?;
    }

    storage.emit(RegistryEvent::CounterUpdated {
        token_id,
        new_value,
    });
    Ok(())
}

// ========================================
// Full Update
// ========================================

/// Set level and counter together
///
/// Both transitions are checked before anything is written. Errors are
/// reported in the order `LevelDecrease`, `LevelExceedsMax`, `CounterDecrease`.
pub fn update<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &CallContext,
    token_id: TokenId,
    new_level: u32,
    new_counter: u64,
) -> RegistryResult<()> {
    let (mut token, token_type) = load_for_update(storage, ctx, token_id)?;
    check_level(token.level, new_level, token_type.max_level)?;
    check_counter(token.counter, new_counter)?;

    if token.level != new_level || token.counter != new_counter {
        token.level = new_level;
        token.counter = new_counter;
        storage.set_token(&token)?;
    }

    storage.emit(RegistryEvent::LevelUp {
        token_id,
        new_level,
    });
    storage.emit(RegistryEvent::CounterUpdated {
        token_id,
        new_value: new_counter,
    });
    Ok(())
}
