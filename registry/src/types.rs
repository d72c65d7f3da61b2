// Registry - Core Types
// This module defines the records stored by the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{INITIAL_COUNTER, INITIAL_LEVEL};
use crate::identity::Identity;
use crate::serializer::ReaderError;

/// Caller supplied token type identifier
pub type TypeId = u64;

/// Sequential token identifier, starting at 1
pub type TokenId = u64;

// ========================================
// Collection
// ========================================

/// What the tokens of a collection are
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Character,
    Weapon,
}

impl TokenKind {
    /// What the secondary progression counter measures
    pub fn counter_name(&self) -> &'static str {
        match self {
            TokenKind::Character => "games played",
            TokenKind::Weapon => "enemies hit",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Character => "character",
            TokenKind::Weapon => "weapon",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Type Records
// ========================================

/// Rarity tier of a token type
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Rarity {
    type Error = ReaderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Rarity::Common,
            1 => Rarity::Uncommon,
            2 => Rarity::Rare,
            3 => Rarity::Epic,
            4 => Rarity::Legendary,
            _ => return Err(ReaderError::InvalidValue),
        })
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> Self {
        rarity.id()
    }
}

/// Kind specific descriptive fields of a type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeTraits {
    Character {
        active_skill_1: String,
        active_skill_2: String,
        /// Release date of the character class, unix millis
        issue_date: u64,
    },
    Weapon {
        improvement_slots: u8,
        minting_epoch: u64,
    },
}

impl TypeTraits {
    pub fn kind(&self) -> TokenKind {
        match self {
            TypeTraits::Character { .. } => TokenKind::Character,
            TypeTraits::Weapon { .. } => TokenKind::Weapon,
        }
    }
}

/// Immutable characteristics shared by every token of a type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    /// Display name
    pub name: String,
    /// Highest level a token of this type can reach
    pub max_level: u32,
    pub rarity: Rarity,
    #[serde(flatten)]
    pub traits: TypeTraits,
}

impl TypeRecord {
    pub fn character(
        name: impl Into<String>,
        max_level: u32,
        rarity: Rarity,
        active_skill_1: impl Into<String>,
        active_skill_2: impl Into<String>,
        issue_date: u64,
    ) -> Self {
        Self {
            name: name.into(),
            max_level,
            rarity,
            traits: TypeTraits::Character {
                active_skill_1: active_skill_1.into(),
                active_skill_2: active_skill_2.into(),
                issue_date,
            },
        }
    }

    pub fn weapon(
        name: impl Into<String>,
        max_level: u32,
        rarity: Rarity,
        improvement_slots: u8,
        minting_epoch: u64,
    ) -> Self {
        Self {
            name: name.into(),
            max_level,
            rarity,
            traits: TypeTraits::Weapon {
                improvement_slots,
                minting_epoch,
            },
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.traits.kind()
    }
}

// ========================================
// Token Records
// ========================================

/// Progression state of one minted token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: TokenId,
    /// Owner as recorded at mint time, transfers are tracked by the host
    pub owner: Identity,
    pub type_id: TypeId,
    pub level: u32,
    /// Games played or enemies hit, depending on the collection kind
    pub counter: u64,
}

impl TokenRecord {
    /// A freshly minted token
    pub fn new(id: TokenId, owner: Identity, type_id: TypeId) -> Self {
        Self {
            id,
            owner,
            type_id,
            level: INITIAL_LEVEL,
            counter: INITIAL_COUNTER,
        }
    }
}
