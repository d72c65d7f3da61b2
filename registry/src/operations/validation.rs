// Registry Input Validation Helpers
// This module provides validation functions for operation inputs.

use crate::config::{
    MAX_COLLECTION_NAME_LENGTH, MAX_COLLECTION_SYMBOL_LENGTH, MAX_LOCATOR_PREFIX_LENGTH,
    MAX_NAME_LENGTH, MAX_SKILL_LENGTH,
};
use crate::error::{RegistryError, RegistryResult};
use crate::identity::Identity;
use crate::types::{TokenKind, TypeRecord, TypeTraits};

// ========================================
// Collection Validation
// ========================================

/// Validate collection name and symbol
pub fn validate_collection(name: &str, symbol: &str) -> RegistryResult<()> {
    validate_name(name, MAX_COLLECTION_NAME_LENGTH)?;
    if symbol.is_empty() || symbol.len() > MAX_COLLECTION_SYMBOL_LENGTH {
        return Err(RegistryError::InvalidSymbol);
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(RegistryError::InvalidSymbol);
    }
    Ok(())
}

// ========================================
// Type Validation
// ========================================

fn validate_name(name: &str, max: usize) -> RegistryResult<()> {
    if name.trim().is_empty() {
        return Err(RegistryError::InvalidName);
    }
    if name.len() > max {
        return Err(RegistryError::NameTooLong {
            length: name.len(),
            max,
        });
    }
    Ok(())
}

fn validate_skill(skill: &str) -> RegistryResult<()> {
    if skill.len() > MAX_SKILL_LENGTH {
        return Err(RegistryError::NameTooLong {
            length: skill.len(),
            max: MAX_SKILL_LENGTH,
        });
    }
    Ok(())
}

/// Validate a type record for a collection of `kind`
pub fn validate_type_record(record: &TypeRecord, kind: TokenKind) -> RegistryResult<()> {
    validate_name(&record.name, MAX_NAME_LENGTH)?;

    if record.max_level == 0 {
        return Err(RegistryError::InvalidMaxLevel);
    }

    if record.kind() != kind {
        return Err(RegistryError::TraitsMismatch { expected: kind });
    }

    if let TypeTraits::Character {
        active_skill_1,
        active_skill_2,
        ..
    } = &record.traits
    {
        validate_skill(active_skill_1)?;
        validate_skill(active_skill_2)?;
    }

    Ok(())
}

// ========================================
// Token Validation
// ========================================

/// Validate a mint recipient (must be non-zero)
pub fn validate_owner(owner: &Identity) -> RegistryResult<()> {
    if owner.is_zero() {
        return Err(RegistryError::InvalidOwner);
    }
    Ok(())
}

// ========================================
// Locator Validation
// ========================================

pub fn validate_locator_prefix(prefix: &str) -> RegistryResult<()> {
    if prefix.len() > MAX_LOCATOR_PREFIX_LENGTH {
        return Err(RegistryError::PrefixTooLong {
            length: prefix.len(),
            max: MAX_LOCATOR_PREFIX_LENGTH,
        });
    }
    Ok(())
}

// ========================================
// Batch Validation
// ========================================

/// A registry must accept at least one operation per batch
pub fn validate_batch_limit(max: usize) -> RegistryResult<()> {
    if max == 0 {
        return Err(RegistryError::InvalidBatchLimit);
    }
    Ok(())
}

pub fn validate_batch_size(size: usize, max: usize) -> RegistryResult<()> {
    if size == 0 {
        return Err(RegistryError::EmptyBatch);
    }
    if size > max {
        return Err(RegistryError::BatchTooLarge { size, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rarity;

    #[test]
    fn test_validate_collection() {
        assert!(validate_collection("Prime Games Character", "PGC").is_ok());
        assert_eq!(
            validate_collection("Prime Games Character", "pgc"),
            Err(RegistryError::InvalidSymbol)
        );
        assert_eq!(
            validate_collection("Prime Games Character", "TOOLONGSYM"),
            Err(RegistryError::InvalidSymbol)
        );
        assert_eq!(validate_collection(" ", "PGC"), Err(RegistryError::InvalidName));
    }

    #[test]
    fn test_validate_type_record() {
        let record = TypeRecord::character(
            "Agent Becker",
            40,
            Rarity::Common,
            "K-56 grenade",
            "Medpack",
            0,
        );
        assert!(validate_type_record(&record, TokenKind::Character).is_ok());
        assert_eq!(
            validate_type_record(&record, TokenKind::Weapon),
            Err(RegistryError::TraitsMismatch {
                expected: TokenKind::Weapon
            })
        );
    }

    #[test]
    fn test_validate_type_record_bounds() {
        let zero_level = TypeRecord::weapon("Old Rifle", 0, Rarity::Common, 0, 0);
        assert_eq!(
            validate_type_record(&zero_level, TokenKind::Weapon),
            Err(RegistryError::InvalidMaxLevel)
        );

        let unnamed = TypeRecord::weapon("", 10, Rarity::Common, 0, 0);
        assert_eq!(
            validate_type_record(&unnamed, TokenKind::Weapon),
            Err(RegistryError::InvalidName)
        );

        let long_skill = TypeRecord::character("Gelu", 38, Rarity::Epic, "x".repeat(65), "Luck", 0);
        assert_eq!(
            validate_type_record(&long_skill, TokenKind::Character),
            Err(RegistryError::NameTooLong {
                length: 65,
                max: MAX_SKILL_LENGTH
            })
        );
    }

    #[test]
    fn test_validate_owner() {
        assert_eq!(
            validate_owner(&Identity::zero()),
            Err(RegistryError::InvalidOwner)
        );
        assert!(validate_owner(&Identity::new([3; 32])).is_ok());
    }

    #[test]
    fn test_validate_locator_prefix() {
        assert!(validate_locator_prefix("ipfs://bafy/").is_ok());
        assert!(validate_locator_prefix("").is_ok());
        assert!(matches!(
            validate_locator_prefix(&"a".repeat(MAX_LOCATOR_PREFIX_LENGTH + 1)),
            Err(RegistryError::PrefixTooLong { .. })
        ));
    }

    #[test]
    fn test_validate_batch_size() {
        assert_eq!(validate_batch_size(0, 10), Err(RegistryError::EmptyBatch));
        assert_eq!(
            validate_batch_size(11, 10),
            Err(RegistryError::BatchTooLarge { size: 11, max: 10 })
        );
        assert!(validate_batch_size(10, 10).is_ok());
    }

    #[test]
    fn test_validate_batch_limit() {
        assert_eq!(validate_batch_limit(0), Err(RegistryError::InvalidBatchLimit));
        assert!(validate_batch_limit(1).is_ok());
    }
}
