// Binary encoding of registry records and batch operations
//
// This is the wire form of an encoded call. Every variant carries a one
// byte tag; unknown tags, oversize strings, truncated input and trailing
// bytes are all rejected.

use crate::config::{MAX_LOCATOR_PREFIX_LENGTH, MAX_NAME_LENGTH, MAX_SKILL_LENGTH};
use crate::identity::Identity;
use crate::operations::Operation;
use crate::serializer::{Reader, ReaderError, Serializer, Writer};
use crate::types::{Rarity, TokenKind, TokenRecord, TypeRecord, TypeTraits};

// ========================================
// Primitives
// ========================================

impl Serializer for Identity {
    fn write(&self, writer: &mut Writer) {
        writer.write_identity(self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_identity()
    }
}

impl Serializer for TokenKind {
    fn write(&self, writer: &mut Writer) {
        writer.write_u8(match self {
            TokenKind::Character => 0,
            TokenKind::Weapon => 1,
        });
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        match reader.read_u8()? {
            0 => Ok(TokenKind::Character),
            1 => Ok(TokenKind::Weapon),
            _ => Err(ReaderError::InvalidValue),
        }
    }
}

impl Serializer for Rarity {
    fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.id());
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Rarity::try_from(reader.read_u8()?)
    }
}

// ========================================
// Records
// ========================================

impl Serializer for TypeTraits {
    fn write(&self, writer: &mut Writer) {
        match self {
            TypeTraits::Character {
                active_skill_1,
                active_skill_2,
                issue_date,
            } => {
                TokenKind::Character.write(writer);
                writer.write_string(active_skill_1);
                writer.write_string(active_skill_2);
                writer.write_u64(*issue_date);
            }
            TypeTraits::Weapon {
                improvement_slots,
                minting_epoch,
            } => {
                TokenKind::Weapon.write(writer);
                writer.write_u8(*improvement_slots);
                writer.write_u64(*minting_epoch);
            }
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(match TokenKind::read(reader)? {
            TokenKind::Character => TypeTraits::Character {
                active_skill_1: reader.read_string_max(MAX_SKILL_LENGTH)?,
                active_skill_2: reader.read_string_max(MAX_SKILL_LENGTH)?,
                issue_date: reader.read_u64()?,
            },
            TokenKind::Weapon => TypeTraits::Weapon {
                improvement_slots: reader.read_u8()?,
                minting_epoch: reader.read_u64()?,
            },
        })
    }
}

impl Serializer for TypeRecord {
    fn write(&self, writer: &mut Writer) {
        writer.write_string(&self.name);
        writer.write_u32(self.max_level);
        self.rarity.write(writer);
        self.traits.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let name = reader.read_string_max(MAX_NAME_LENGTH)?;
        let max_level = reader.read_u32()?;
        let rarity = Rarity::read(reader)?;
        let traits = TypeTraits::read(reader)?;
        Ok(TypeRecord {
            name,
            max_level,
            rarity,
            traits,
        })
    }
}

impl Serializer for TokenRecord {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.id);
        self.owner.write(writer);
        writer.write_u64(self.type_id);
        writer.write_u32(self.level);
        writer.write_u64(self.counter);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(TokenRecord {
            id: reader.read_u64()?,
            owner: Identity::read(reader)?,
            type_id: reader.read_u64()?,
            level: reader.read_u32()?,
            counter: reader.read_u64()?,
        })
    }
}

// ========================================
// Operations
// ========================================

impl Operation {
    fn tag(&self) -> u8 {
        match self {
            Operation::AddType { .. } => 0,
            Operation::Mint { .. } => 1,
            Operation::LevelUp { .. } => 2,
            Operation::UpdateCounter { .. } => 3,
            Operation::Update { .. } => 4,
            Operation::SetLocatorPrefix { .. } => 5,
            Operation::GrantRole { .. } => 6,
            Operation::RevokeRole { .. } => 7,
        }
    }
}

impl Serializer for Operation {
    fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.tag());
        match self {
            Operation::AddType { id, record } => {
                writer.write_u64(*id);
                record.write(writer);
            }
            Operation::Mint { owner, type_id } => {
                owner.write(writer);
                writer.write_u64(*type_id);
            }
            Operation::LevelUp { token_id, level } => {
                writer.write_u64(*token_id);
                writer.write_u32(*level);
            }
            Operation::UpdateCounter { token_id, value } => {
                writer.write_u64(*token_id);
                writer.write_u64(*value);
            }
            Operation::Update {
                token_id,
                level,
                counter,
            } => {
                writer.write_u64(*token_id);
                writer.write_u32(*level);
                writer.write_u64(*counter);
            }
            Operation::SetLocatorPrefix { prefix } => {
                writer.write_string(prefix);
            }
            Operation::GrantRole { role, account } | Operation::RevokeRole { role, account } => {
                writer.write_bytes(role);
                account.write(writer);
            }
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let tag = reader.read_u8()?;
        Ok(match tag {
            0 => Operation::AddType {
                id: reader.read_u64()?,
                record: TypeRecord::read(reader)?,
            },
            1 => Operation::Mint {
                owner: Identity::read(reader)?,
                type_id: reader.read_u64()?,
            },
            2 => Operation::LevelUp {
                token_id: reader.read_u64()?,
                level: reader.read_u32()?,
            },
            3 => Operation::UpdateCounter {
                token_id: reader.read_u64()?,
                value: reader.read_u64()?,
            },
            4 => Operation::Update {
                token_id: reader.read_u64()?,
                level: reader.read_u32()?,
                counter: reader.read_u64()?,
            },
            5 => Operation::SetLocatorPrefix {
                prefix: reader.read_string_max(MAX_LOCATOR_PREFIX_LENGTH)?,
            },
            6 => Operation::GrantRole {
                role: reader.read_bytes_32()?,
                account: Identity::read(reader)?,
            },
            7 => Operation::RevokeRole {
                role: reader.read_bytes_32()?,
                account: Identity::read(reader)?,
            },
            _ => return Err(ReaderError::InvalidValue),
        })
    }
}
